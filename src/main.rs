use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beaconr::{
    BeaconClient, RequestSigner, Variant,
    config::{Cli, Command, GenKeyArgs, QueryArgs},
    keys,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only response JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        std::process::exit(1);
    };

    match command {
        Command::GenKey(args) => run_gen_key(args)?,
        Command::Query(args) => run_query(args).await?,
    }

    Ok(())
}

fn run_gen_key(args: GenKeyArgs) -> anyhow::Result<()> {
    tracing::info!("generating {}-bit RSA key pair", args.key_length);

    let key = keys::generate(args.key_length)?;
    let pub_file = keys::write_key_pair(&key, &args.key_file)?;

    tracing::info!("private key: {}", args.key_file.display());
    tracing::info!("public key:  {}", pub_file.display());
    tracing::info!("done generating key pair");

    Ok(())
}

async fn run_query(args: QueryArgs) -> anyhow::Result<()> {
    let variant: Option<Variant> = args.variant.as_deref().map(str::parse).transpose()?;

    let key = keys::load_private_key(&args.key_file)?;
    let signer = RequestSigner::new(key, args.key_id);
    let client = BeaconClient::new(&args.endpoint, args.beacon_user, signer)?;

    match &variant {
        Some(variant) => client.query(variant).await?,
        None => client.info().await?,
    };

    Ok(())
}
