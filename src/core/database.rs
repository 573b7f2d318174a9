use tracing::{info, warn};
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::types::{Monster, User};
use crate::store::collection::Collection;
use crate::store::seed::SeedFile;

/// Process-wide store handle: opened once at startup, shared behind an `Arc`
/// and handed to the GraphQL layer as context data.
pub struct Database {
    config: Config,

    monsters: Collection<Monster>,
    users: Collection<User>,
}

impl Database {
    /// Open the store, loading the seed file when one is configured.
    /// A missing or malformed seed fails startup.
    pub fn open(config: Config) -> Result<Self> {
        let db = Self::with_config(config);

        if let Some(path) = db.config.seed_path.clone() {
            info!("Loading seed data from {}", path.display());
            SeedFile::load(&path)?.apply(&db.monsters, &db.users)?;
        }

        if db.monsters.is_empty() {
            warn!("No monsters loaded; set DUNGEONDEX_SEED to a seed file");
        }

        Ok(db)
    }

    pub fn in_memory() -> Self {
        Self::with_config(Config::default())
    }

    fn with_config(config: Config) -> Self {
        Database {
            config,
            monsters: Collection::new(),
            users: Collection::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn monsters(&self) -> &Collection<Monster> {
        &self.monsters
    }

    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub fn add_monster(&self, monster: Monster) -> Result<()> {
        self.monsters.insert(monster)
    }

    pub fn add_user(&self, user: User) -> Result<()> {
        self.users.insert(user)
    }
}
