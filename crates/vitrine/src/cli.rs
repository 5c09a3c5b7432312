//! Clap derive structures for the `vitrine` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vitrine -- catalog admin from the command line
#[derive(Debug, Parser)]
#[command(
    name = "vitrine",
    version,
    about = "Manage a product catalog from the command line",
    long_about = "Administer categories, products, product SKUs and SKU images\n\
        served by a catalog REST API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "VITRINE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Catalog API base URL (overrides profile)
    #[arg(long, short = 'u', env = "VITRINE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: `[defaults] output`, else table]
    #[arg(
        id = "output",
        long = "output",
        short = 'o',
        env = "VITRINE_OUTPUT",
        value_name = "FORMAT",
        global = true
    )]
    pub output_flag: Option<OutputFormat>,

    /// When to use color output [default: `[defaults] color`, else auto]
    #[arg(id = "color", long = "color", value_name = "WHEN", global = true)]
    pub color_flag: Option<ColorMode>,

    /// Effective output format once config defaults are applied.
    #[arg(skip)]
    pub output: OutputFormat,

    /// Effective color mode once config defaults are applied.
    #[arg(skip)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "VITRINE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "VITRINE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    #[default]
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage categories
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// Manage products
    #[command(alias = "prod")]
    Products(ProductsArgs),

    /// Edit the SKUs of a product
    Skus(SkusArgs),

    /// Manage images attached to a SKU
    #[command(alias = "img")]
    Images(ImagesArgs),

    /// Open an admin route (e.g. /products/3/skus) and show its page
    Open {
        /// Route path
        path: String,
    },

    /// Catalog totals
    #[command(alias = "dash")]
    Dashboard,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Categories ───────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories
    #[command(alias = "ls")]
    List,

    /// Show one category
    Get {
        /// Category ID
        id: String,
    },

    /// Create a category
    Create {
        /// Category name
        #[arg(long)]
        name: String,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Update a category
    Update {
        /// Category ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a category
    #[command(alias = "rm")]
    Delete {
        /// Category ID
        id: String,
    },
}

// ── Products ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: ProductsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommand {
    /// List products
    #[command(alias = "ls")]
    List,

    /// Show one product
    Get {
        /// Product ID
        id: String,
    },

    /// Create a product
    Create {
        /// Product name
        #[arg(long)]
        name: String,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Category ID
        #[arg(long)]
        category: Option<String>,
    },

    /// Update a product
    Update {
        /// Product ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New category ID
        #[arg(long)]
        category: Option<String>,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        id: String,
    },
}

// ── SKUs ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SkusArgs {
    #[command(subcommand)]
    pub command: SkusCommand,
}

/// The five SKU fields, as flags.
#[derive(Debug, Args)]
pub struct SkuFieldArgs {
    /// SKU code
    #[arg(long)]
    pub sku: Option<String>,

    /// Cost price
    #[arg(long)]
    pub cost_price: Option<String>,

    /// Sale price
    #[arg(long)]
    pub sale_price: Option<String>,

    /// Price
    #[arg(long)]
    pub price: Option<String>,

    /// Stock quantity
    #[arg(long)]
    pub quantity: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum SkusCommand {
    /// List the SKUs of a product
    #[command(alias = "ls")]
    List {
        /// Product ID
        product: String,
    },

    /// Add a SKU and save the product's SKU list
    Add {
        /// Product ID
        product: String,

        #[command(flatten)]
        fields: SkuFieldArgs,
    },

    /// Change fields of an existing SKU and save the product's SKU list
    Set {
        /// Product ID
        product: String,

        /// SKU ID
        sku_id: String,

        #[command(flatten)]
        fields: SkuFieldArgs,
    },

    /// Upsert SKUs from a JSON or YAML file and save
    Sync {
        /// Product ID
        product: String,

        /// File holding a list of SKUs (rows with `id` update, rows
        /// without create)
        #[arg(long, short = 'F')]
        from_file: PathBuf,
    },

    /// Delete a SKU
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        product: String,

        /// SKU ID
        sku_id: String,
    },

    /// Edit the SKU list interactively
    Edit {
        /// Product ID
        product: String,

        /// Open in create mode (continues at the product's SKU route)
        #[arg(long)]
        new: bool,
    },
}

// ── Images ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ImagesArgs {
    #[command(subcommand)]
    pub command: ImagesCommand,
}

#[derive(Debug, Subcommand)]
pub enum ImagesCommand {
    /// List the images of a SKU
    #[command(alias = "ls")]
    List {
        /// Product ID
        product: String,

        /// SKU ID
        sku_id: String,
    },

    /// Upload an image file
    Upload {
        /// Product ID
        product: String,

        /// SKU ID
        sku_id: String,

        /// Image file
        file: PathBuf,
    },

    /// Delete an image
    #[command(alias = "rm")]
    Delete {
        /// Product ID
        product: String,

        /// SKU ID
        sku_id: String,

        /// Image ID
        image_id: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Key: api_url, ca_cert, insecure, timeout
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
