use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::{
    cache::Cache,
    config::Config,
    error::Error,
    esi::EsiClient,
    etag::EtagService,
    processor::{
        clones::CloneProcessor, contacts::ContactProcessor, public_info::PublicInfoProcessor,
        skills::SkillProcessor, Dispatcher,
    },
    sync::{
        alliance::AllianceSync, character::CharacterSync, clone::CloneSync, contact::ContactSync,
        corporation::CorporationSync, implant::ImplantSync, skill::SkillSync,
        solar_system::SolarSystemSync, Synchronizer,
    },
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Connect to Valkey/Redis for the cache and the refresh queue
pub async fn connect_to_valkey(config: &Config) -> Result<fred::prelude::Pool, Error> {
    use fred::prelude::*;

    let redis_config = fred::prelude::Config::from_url(&config.valkey_url)?;
    let pool = Pool::new(redis_config, None, None, None, 6)?;

    pool.connect();
    pool.wait_for_connect().await?;

    Ok(pool)
}

/// Build the upstream ESI client with the configured identity
pub fn build_esi_client(config: &Config) -> Result<EsiClient, Error> {
    EsiClient::new(&config.esi_base_url, &config.user_agent)
}

/// One synchronizer per mirrored entity kind, sharing the database, cache,
/// freshness service, and ESI client.
pub struct Synchronizers {
    pub alliances: Arc<Synchronizer<AllianceSync>>,
    pub corporations: Arc<Synchronizer<CorporationSync>>,
    pub characters: Arc<Synchronizer<CharacterSync>>,
    pub solar_systems: Arc<Synchronizer<SolarSystemSync>>,
    pub clones: Arc<Synchronizer<CloneSync>>,
    pub implants: Arc<Synchronizer<ImplantSync>>,
    pub contacts: Arc<Synchronizer<ContactSync>>,
    pub skills: Arc<Synchronizer<SkillSync>>,
}

pub fn build_synchronizers(
    db: &DatabaseConnection,
    cache: Arc<dyn Cache>,
    esi: &EsiClient,
) -> Synchronizers {
    let etags = EtagService::new(db.clone(), Arc::clone(&cache));

    macro_rules! synchronizer {
        ($resource:expr) => {
            Arc::new(Synchronizer::new(
                db.clone(),
                Arc::clone(&cache),
                etags.clone(),
                esi.clone(),
                $resource,
            ))
        };
    }

    Synchronizers {
        alliances: synchronizer!(AllianceSync),
        corporations: synchronizer!(CorporationSync),
        characters: synchronizer!(CharacterSync),
        solar_systems: synchronizer!(SolarSystemSync),
        clones: synchronizer!(CloneSync),
        implants: synchronizer!(ImplantSync),
        contacts: synchronizer!(ContactSync),
        skills: synchronizer!(SkillSync),
    }
}

/// Register the fixed processor set, in dispatch order.
pub fn build_dispatcher(synchronizers: &Synchronizers) -> Dispatcher {
    Dispatcher::new(vec![
        Arc::new(PublicInfoProcessor::new(
            Arc::clone(&synchronizers.characters),
            Arc::clone(&synchronizers.corporations),
            Arc::clone(&synchronizers.alliances),
        )),
        Arc::new(CloneProcessor::new(
            Arc::clone(&synchronizers.clones),
            Arc::clone(&synchronizers.implants),
        )),
        Arc::new(ContactProcessor::new(Arc::clone(&synchronizers.contacts))),
        Arc::new(SkillProcessor::new(Arc::clone(&synchronizers.skills))),
    ])
}
