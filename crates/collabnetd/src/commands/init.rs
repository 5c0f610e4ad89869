//! Module for initializing the collabnet database and configuration.

use dialoguer::Confirm;

use super::*;

/// Function for the [`Commands::Init`] in the CLI.
///
/// Writes a default configuration file if none exists, then creates the
/// database with its schema. An existing database is only recreated after
/// confirmation.
pub async fn init(cli: &Cli) -> Result<()> {
  let config_path = Config::default_path();
  if !config_path.exists() {
    let config = load_config();
    config.write(&config_path)?;
    println!(
      "{} Wrote default configuration to {}",
      style(INFO_PREFIX).blue(),
      config_path.display()
    );
  }

  let config = load_config();
  let db_path = database_path(cli, &config);

  if db_path.exists() {
    let recreate = !cli.accept_defaults
      && Confirm::new()
        .with_prompt("Database already exists. Recreate it from scratch?")
        .default(false)
        .interact()?;

    if recreate {
      std::fs::remove_file(&db_path)?;
      println!("{} Removed existing database", style(INFO_PREFIX).blue());
    } else {
      println!(
        "{} Keeping existing database at {}",
        style(SUCCESS_PREFIX).green(),
        db_path.display()
      );
      return Ok(());
    }
  }

  open_database(cli, &config).await?;
  println!(
    "{} Initialized database at {}",
    style(SUCCESS_PREFIX).green(),
    db_path.display()
  );
  Ok(())
}
