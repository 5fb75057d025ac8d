use crate::cli::commands::{UserArgs, UserCommand};
use crate::cli::load_config;
use crate::db::Database;
use crate::errors::PlanixError;
use tracing::info;

pub async fn handle_user(args: UserArgs) -> Result<(), PlanixError> {
    match args.action {
        UserCommand::Add(add) => {
            let config = load_config(add.config.as_deref()).await?;
            let db_path = add.db.unwrap_or_else(|| config.db_path());
            let db = Database::new(&db_path)?;

            let user = db.create_user(&add.username)?;
            info!(user = %user.username, id = %user.id, "User created");

            println!("User:  {}", user.username);
            println!("Token: {}", user.api_token);
            println!("Send it as: Authorization: Bearer {}", user.api_token);
            Ok(())
        }
    }
}
