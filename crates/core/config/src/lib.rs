use cached::proc_macro::cached;
use config::{Config, File, FileFormat};
use futures_locks::RwLock;
use once_cell::sync::Lazy;
use serde::Deserialize;

static CONFIG_BUILDER: Lazy<RwLock<Config>> = Lazy::new(|| {
    RwLock::new({
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../Beacon.toml"),
            FileFormat::Toml,
        ));

        if std::path::Path::new("Beacon.toml").exists() {
            builder = builder.add_source(File::new("Beacon.toml", FileFormat::Toml));
        }

        builder.build().unwrap()
    })
});

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    pub mongodb: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Hosts {
    pub app: String,
    pub api: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiRegistration {
    pub open: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Api {
    pub registration: ApiRegistration,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FeaturesLimits {
    pub title_length: usize,
    pub description_length: usize,
    pub message_length: usize,
    pub bulk_batch: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Features {
    pub limits: FeaturesLimits,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: Database,
    pub hosts: Hosts,
    pub api: Api,
    pub features: Features,
}

pub async fn init() {
    println!(
        ":: Beacon Configuration ::\n\x1b[32m{:?}\x1b[0m",
        config().await
    );
}

pub async fn read() -> Config {
    CONFIG_BUILDER.read().await.clone()
}

#[cached(time = 30)]
pub async fn config() -> Settings {
    read().await.try_deserialize::<Settings>().unwrap()
}

/// Initialise the logger for a service
pub fn setup_logging() {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
}

/// Configure logging and common requirements for a service
#[macro_export]
macro_rules! configure {
    () => {
        $crate::setup_logging();
        $crate::init().await;
    };
}

#[cfg(feature = "test")]
#[cfg(test)]
mod tests {
    use crate::init;

    #[async_std::test]
    async fn it_works() {
        init().await;
    }
}
