use authgate::{
    args,
    config,
    http::{self, state},
    keypair,
    logging,
    servers::Servers,
    services::memory::{MemoryProfileStore, MemoryUserStore, StaticIntegrations},
    session::Session,
    signing::RsaSigningService,
};
use snafu::{Report, ResultExt, Snafu};
use std::{io, sync::Arc};
use tokio::net;
use tracing::info;

#[derive(Debug, Snafu)]
enum ApplicationError {
    #[snafu(display("initializing app logging"))]
    InitLogging {
        #[snafu(source)]
        source: logging::InitLoggingError,
    },

    #[snafu(display("loading signing key"))]
    LoadSigningKey {
        #[snafu(source)]
        source: keypair::KeyStoreError,
    },

    #[snafu(display("preparing signing key"))]
    SigningKey {
        #[snafu(source)]
        source: openssl::error::ErrorStack,
    },

    #[snafu(display("loading config"))]
    LoadConfig {
        #[snafu(source)]
        source: config::LoadConfigError,
    },

    #[snafu(display("building async runtime"))]
    Runtime {
        #[snafu(source)]
        source: io::Error,
    },

    #[snafu(display("binding TCP listener"))]
    BindListener {
        #[snafu(source)]
        source: io::Error,
    },

    #[snafu(display("serving HTTP API"))]
    ServeHttp {
        #[snafu(source)]
        source: io::Error,
    },
}

fn main() -> Report<ApplicationError> {
    Report::capture(common_main)
}

fn common_main() -> Result<(), ApplicationError> {
    let args = args::load();

    logging::load(&args.logs_dir).context(InitLoggingSnafu)?;

    let config = match config::load_or_create_config(&args.config_path).context(LoadConfigSnafu)? {
        config::ConfigSource::Created(config) => {
            info!(
                "application config not found. created new ({:?}): {:?}",
                args.config_path, config
            );
            return Ok(());
        }
        config::ConfigSource::Loaded(config) => config,
    };

    let signing_key =
        keypair::load_or_create(&args.data_dir.join("keys")).context(LoadSigningKeySnafu)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context(RuntimeSnafu)?;
    rt.block_on(async_main(config, signing_key))
}

async fn async_main(
    config: config::Config,
    signing_key: openssl::rsa::Rsa<openssl::pkey::Private>,
) -> Result<(), ApplicationError> {
    let addr = std::net::SocketAddr::from((config.binds.host, config.binds.port));
    let listener = net::TcpListener::bind(addr)
        .await
        .context(BindListenerSnafu)?;
    info!("session server listening on address {}", addr);

    let session = Session::new(
        Arc::new(MemoryUserStore::new(config.users)),
        Arc::new(StaticIntegrations::new(config.integrations)),
        Arc::new(RsaSigningService::new(signing_key).context(SigningKeySnafu)?),
        config.meta,
        config.skin_domains,
    );
    let servers = Servers::new(Arc::new(MemoryProfileStore::new(config.profiles)));

    let state = Arc::new(state::State { session, servers });
    http::init(listener, state).await.context(ServeHttpSnafu)?;

    Ok(())
}
