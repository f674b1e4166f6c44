pub mod client;
pub mod game_list;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};

use crate::dtos::product::UpdateProductRequest;
use client::ApiClient;
use game_list::render_game_list;

#[derive(Parser)]
#[command(name = "gameshelf-admin")]
#[command(about = "GameShelf admin CLI - manage the board game catalog")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, default_value = "http://127.0.0.1:3000", help = "Base URL of the GameShelf API")]
    pub server: String,

    #[arg(long, global = true, env = "GAMESHELF_TOKEN", help = "Admin session token")]
    pub token: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List the board game catalog")]
    List,

    #[command(about = "Update fields of a product; omitted fields stay unchanged")]
    Edit {
        #[arg(help = "Product id")]
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        stock: Option<i32>,
        #[arg(long)]
        available: Option<bool>,
        #[arg(long)]
        image: Option<String>,
    },

    #[command(about = "Delete a product (refused while order items reference it)")]
    Delete {
        #[arg(help = "Product id")]
        id: String,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let client = ApiClient::new(cli.server, cli.token);

    match cli.command {
        Commands::List => {
            let games = client.list_products().await?;
            print!("{}", render_game_list(&games));
            Ok(())
        }
        Commands::Edit { id, name, description, price, stock, available, image } => {
            let patch = UpdateProductRequest { name, description, price, stock, available, image };
            let updated = client.update_product(&id, &patch).await?;
            println!(
                "✓ Producto actualizado: {} (stock: {}, precio: ${:.2})",
                updated.name, updated.stock, updated.price
            );
            Ok(())
        }
        Commands::Delete { id, yes } => {
            if !yes && !confirm_delete()? {
                println!("Operación cancelada");
                return Ok(());
            }
            // The await blocks until the server answers, so the action
            // cannot be re-invoked while a request is outstanding.
            match client.delete_product(&id).await {
                Ok(message) => {
                    println!("✓ {message}");
                    // Refresh the shelf after a successful delete
                    let games = client.list_products().await?;
                    print!("{}", render_game_list(&games));
                }
                Err(e) => eprintln!("Error: {e}"),
            }
            Ok(())
        }
    }
}

fn confirm_delete() -> Result<bool> {
    print!("¿Estás seguro de que quieres eliminar este producto? Esta acción no se puede deshacer. [s/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::is_affirmative;

    #[test]
    fn affirmative_answers_proceed() {
        assert!(is_affirmative("s"));
        assert!(is_affirmative("Si"));
        assert!(is_affirmative("sí\n"));
        assert!(is_affirmative("  YES "));
    }

    #[test]
    fn anything_else_cancels() {
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("seguro"));
    }
}
