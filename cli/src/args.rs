use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use healthyday_core::domain::{
    common::{
        ApiConfig, CacheConfig, DEFAULT_API_URL, HealthyDayConfig, SearchConfig, StorageConfig,
    },
    recipe::entities::MealType,
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "healthyday",
    author,
    version,
    about = "Track your fridge, dietary preferences and AI-suggested recipes"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the HealthyDay API
    #[arg(long, global = true, env = "HEALTHYDAY_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory holding the local store (session and caches)
    #[arg(long, global = true, env = "HEALTHYDAY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "HEALTHYDAY_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log filter, e.g. "info" or "healthyday_core=debug"
    #[arg(long, global = true, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "HEALTHYDAY_LOG_JSON")]
    pub log_json: bool,
}

impl Args {
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("healthyday")
        })
    }
}

impl From<&Args> for HealthyDayConfig {
    fn from(args: &Args) -> Self {
        HealthyDayConfig {
            api: ApiConfig {
                base_url: args.api_url.clone(),
                timeout: Duration::from_secs(args.timeout_secs),
            },
            storage: StorageConfig {
                data_dir: args.data_dir(),
            },
            cache: CacheConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Log in and keep the session locally
    Login(CredentialsArgs),
    /// Create an account
    Register(CredentialsArgs),
    /// Drop the local session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Manage fridge inventory
    Fridge {
        #[command(subcommand)]
        action: FridgeCommand,
    },
    /// Show or change dietary preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsCommand,
    },
    /// Recipe suggestions for a meal type, cached for an hour
    Recipes {
        meal: MealType,
        /// Ignore the cache and generate again
        #[arg(long)]
        refresh: bool,
    },
    /// Reconcile a suggested recipe against the fridge and confirm the deductions
    Cook {
        meal: MealType,
        /// 1-based position in the recipe list
        index: usize,
        /// Override a deduction: N=QUANTITY, N=QUANTITY:UNIT or N=:UNIT
        #[arg(long = "set", value_name = "ADJUSTMENT")]
        adjustments: Vec<Adjustment>,
        /// Confirm without prompting
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Favourite recipes
    Saved {
        #[command(subcommand)]
        action: SavedCommand,
    },
    /// Daily calorie log
    Calories {
        #[command(subcommand)]
        action: CaloriesCommand,
    },
}

#[derive(Debug, Clone, ClapArgs)]
pub struct CredentialsArgs {
    pub username: String,
    #[arg(long, env = "HEALTHYDAY_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum FridgeCommand {
    /// List fridge contents
    List,
    /// Add an ingredient
    Add(IngredientArgs),
    /// Change fields of an ingredient
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Remove an ingredient
    Remove { id: String },
    /// Interactive ingredient search, one query per input line
    Search,
    /// Turn free text into ingredients
    Parse {
        text: String,
        /// Add every parsed ingredient to the fridge
        #[arg(long)]
        add: bool,
    },
    /// Nutrition facts for an ingredient (cached for a day)
    Nutrition {
        name: String,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        unit: Option<String>,
    },
}

#[derive(Debug, Clone, ClapArgs)]
pub struct IngredientArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "1")]
    pub quantity: String,
    #[arg(long, default_value = "")]
    pub unit: String,
    /// YYYY-MM-DD
    #[arg(long)]
    pub expiry: Option<NaiveDate>,
    #[arg(long)]
    pub calories: Option<f64>,
    #[arg(long)]
    pub protein: Option<f64>,
    #[arg(long)]
    pub carbs: Option<f64>,
    #[arg(long)]
    pub fat: Option<f64>,
    /// Fill missing nutrition from the AI lookup
    #[arg(long)]
    pub lookup: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct EditArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub quantity: Option<String>,
    #[arg(long)]
    pub unit: Option<String>,
    #[arg(long)]
    pub expiry: Option<NaiveDate>,
    #[arg(long)]
    pub calories: Option<f64>,
    #[arg(long)]
    pub protein: Option<f64>,
    #[arg(long)]
    pub carbs: Option<f64>,
    #[arg(long)]
    pub fat: Option<f64>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum PrefsCommand {
    Show,
    Set {
        #[arg(long)]
        diet: Option<String>,
        #[arg(long)]
        spice: Option<String>,
        /// Toggle an allergy (repeatable)
        #[arg(long = "allergy")]
        allergies: Vec<String>,
        /// Toggle a goal (repeatable)
        #[arg(long = "goal")]
        goals: Vec<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SavedCommand {
    List,
    /// Save a suggestion from the cached list of a meal type
    Add { meal: MealType, index: usize },
    Remove { id: String },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CaloriesCommand {
    Log {
        calories: f64,
        /// Defaults to today on the server
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        meal: Option<MealType>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Totals per day, by default over the last seven days
    Summary {
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}

/// A `--set` override of one deduction plan entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    /// 0-based.
    pub index: usize,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

impl FromStr for Adjustment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, amount) = s
            .split_once('=')
            .ok_or_else(|| format!("expected N=QUANTITY[:UNIT], got '{}'", s))?;

        let index: usize = index
            .trim()
            .parse()
            .map_err(|_| format!("invalid entry number '{}'", index.trim()))?;
        if index == 0 {
            return Err("entry numbers start at 1".to_string());
        }

        let (quantity, unit) = match amount.split_once(':') {
            Some((quantity, unit)) => (quantity, Some(unit)),
            None => (amount, None),
        };
        let non_blank = |v: &str| Some(v.trim().to_string()).filter(|v| !v.is_empty());

        let adjustment = Adjustment {
            index: index - 1,
            quantity: non_blank(quantity),
            unit: unit.and_then(non_blank),
        };
        if adjustment.quantity.is_none() && adjustment.unit.is_none() {
            return Err(format!("'{}' changes nothing", s));
        }
        Ok(adjustment)
    }
}
