//! CLI module for the inventory client
//!
//! Desktop GUIと同じ操作（一覧、追加、購入、返品、削除、履歴参照）と、
//! プラグインのトランスフォーム送信をコマンドラインから行う。

use crate::client::{InventoryClient, ReturnOutcome};
use crate::config::load_client_config;
use clap::{Parser, Subcommand, ValueEnum};
use inventory_common::types::{parse_timestamp, LogRange, TransformKind, TransformReport};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Inventory client - talk to an inventory server from the terminal
#[derive(Parser, Debug)]
#[command(name = "inventory")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    INVENTORY_URL           Server base URL (default: http://127.0.0.1:8000)
    INVENTORY_TIMEOUT_SECS  Request timeout in seconds (default: 30)
    FLASK_URL, PORT         Deprecated: combined into the base URL when INVENTORY_URL is unset
"#)]
pub struct Cli {
    /// Server base URL (overrides configuration)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// TOML configuration file
    #[arg(short, long, global = true, env = "INVENTORY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print raw JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all items
    List,
    /// Add a new item
    Add {
        /// Item name
        name: String,
        /// Initial quantity
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
    /// Increase an item's quantity by one
    Buy {
        /// Item name
        name: String,
    },
    /// Decrease an item's quantity by one, removing it at zero
    Return {
        /// Item name
        name: String,
    },
    /// Remove an item
    Remove {
        /// Item name
        name: String,
    },
    /// Show a single item
    Status {
        /// Item name
        name: String,
    },
    /// Show audit logs
    Logs {
        /// Which log to show
        #[arg(value_enum)]
        kind: LogKind,
        /// Lower bound (inclusive), e.g. 2024-01-01 or 2024-01-01T00:00:00Z
        #[arg(long)]
        from: Option<String>,
        /// Upper bound (inclusive)
        #[arg(long)]
        to: Option<String>,
    },
    /// Send an object transform report
    Transform {
        /// transform, translation, rotation or scale
        #[arg(value_parser = parse_kind)]
        kind: TransformKind,
        /// Name of the item the object mirrors
        #[arg(long)]
        item: Option<String>,
        /// Quantity shown on the object
        #[arg(long)]
        quantity: Option<i64>,
        /// Position as x,y,z
        #[arg(long, value_parser = parse_vec3)]
        position: Option<[f64; 3]>,
        /// Rotation (radians) as x,y,z
        #[arg(long, value_parser = parse_vec3)]
        rotation: Option<[f64; 3]>,
        /// Scale as x,y,z
        #[arg(long, value_parser = parse_vec3)]
        scale: Option<[f64; 3]>,
    },
    /// Check server health
    Health,
}

/// 参照する監査ログ
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogKind {
    /// 数量更新履歴
    Updates,
    /// 削除履歴
    Deletes,
}

fn parse_kind(s: &str) -> Result<TransformKind, String> {
    TransformKind::from_str(s).ok_or_else(|| {
        format!(
            "unknown transform kind '{}': expected transform, translation, rotation or scale",
            s
        )
    })
}

fn parse_vec3(s: &str) -> Result<[f64; 3], String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in '{}': {}", s, e))?;
    <[f64; 3]>::try_from(parts)
        .map_err(|parts| format!("expected 3 comma-separated values, got {}", parts.len()))
}

/// CLIを実行する
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = load_client_config(cli.config.as_deref())?;
    if let Some(url) = &cli.url {
        config.base_url = url.clone();
    }
    let client = InventoryClient::from_config(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&client, cli.command, cli.json, &mut out).await
}

/// サブコマンドを実行し、結果を `out` に書き出す
pub async fn execute(
    client: &InventoryClient,
    command: Commands,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Commands::List => {
            let items = client.list_items().await?;
            if json {
                return print_json(out, &items);
            }
            if items.is_empty() {
                writeln!(out, "No items")?;
            }
            for item in items {
                writeln!(out, "{:>4}  {:<24} {:>6}", item.id, item.name, item.quantity)?;
            }
        }
        Commands::Add { name, quantity } => {
            let created = client.add_item(&name, quantity).await?;
            if json {
                return print_json(out, &created);
            }
            writeln!(out, "Added '{}' (id {}, quantity {})", name, created.id, quantity)?;
        }
        Commands::Buy { name } => {
            let updated = client.buy_item(&name).await?;
            if json {
                return print_json(out, &updated);
            }
            writeln!(
                out,
                "Bought '{}': {} -> {}",
                name, updated.old_quantity, updated.new_quantity
            )?;
        }
        Commands::Return { name } => match client.return_item(&name).await? {
            ReturnOutcome::Updated(updated) => {
                if json {
                    return print_json(out, &updated);
                }
                writeln!(
                    out,
                    "Returned '{}': {} -> {}",
                    name, updated.old_quantity, updated.new_quantity
                )?;
            }
            ReturnOutcome::Removed(deleted) => {
                if json {
                    return print_json(out, &deleted);
                }
                writeln!(out, "Returned the last '{}'; item removed", name)?;
            }
        },
        Commands::Remove { name } => {
            let deleted = client.remove_item(&name).await?;
            if json {
                return print_json(out, &deleted);
            }
            writeln!(out, "Removed '{}' (quantity {})", name, deleted.quantity)?;
        }
        Commands::Status { name } => {
            let item = client
                .find_item(&name)
                .await?
                .ok_or_else(|| anyhow::anyhow!("Item not found: {}", name))?;
            if json {
                return print_json(out, &item);
            }
            writeln!(
                out,
                "{} (id {}): quantity {}, created {}",
                item.name,
                item.id,
                item.quantity,
                item.created_at.to_rfc3339()
            )?;
        }
        Commands::Logs { kind, from, to } => {
            let range = LogRange {
                from: from.as_deref().map(parse_timestamp).transpose()?,
                to: to.as_deref().map(parse_timestamp).transpose()?,
            };
            match kind {
                LogKind::Updates => {
                    let entries = client.update_logs(&range).await?;
                    if json {
                        return print_json(out, &entries);
                    }
                    if entries.is_empty() {
                        writeln!(out, "No records found")?;
                    }
                    for e in entries {
                        writeln!(
                            out,
                            "{}  {:<24} {} -> {}",
                            e.updated_at.to_rfc3339(),
                            e.item_name,
                            e.old_quantity,
                            e.new_quantity
                        )?;
                    }
                }
                LogKind::Deletes => {
                    let entries = client.delete_logs(&range).await?;
                    if json {
                        return print_json(out, &entries);
                    }
                    if entries.is_empty() {
                        writeln!(out, "No records found")?;
                    }
                    for e in entries {
                        writeln!(
                            out,
                            "{}  {:<24} {}",
                            e.deleted_at.to_rfc3339(),
                            e.item_name,
                            e.quantity
                        )?;
                    }
                }
            }
        }
        Commands::Transform {
            kind,
            item,
            quantity,
            position,
            rotation,
            scale,
        } => {
            let report = TransformReport {
                item_name: item,
                quantity,
                position,
                rotation,
                scale,
            };
            // 送信前に手元で検証し、無駄なリクエストを避ける
            report.validate(kind)?;
            let message = client.send_transform(kind, &report).await?;
            writeln!(out, "{}", message)?;
        }
        Commands::Health => {
            let health = client.health().await?;
            if json {
                return print_json(out, &health);
            }
            writeln!(out, "{} (version {})", health.status, health.version)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
