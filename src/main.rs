use clap::Parser;
use shopswift::app::cart_session::{build_cart, CartCommands, CartSession};
use shopswift::app::views;
use shopswift::utils::logger;
use shopswift::{
    Catalogue, CliConfig, Command, HttpProductSource, ImageResolver, LoadState,
    ProductDetailView, ProductSource, Settings,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let source = Arc::new(HttpProductSource::from_config(&settings)?);
    tracing::info!("Using product API at {}", source.base_url());

    if let Err(e) = run(&config.command, source, &settings).await {
        tracing::error!(
            "❌ Command failed: {} (Severity: {:?})",
            e,
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(
    command: &Command,
    source: Arc<HttpProductSource>,
    settings: &Settings,
) -> shopswift::Result<()> {
    match command {
        Command::Products { category } => {
            let catalogue = Catalogue::load(source.as_ref()).await?;
            let products = catalogue.filter(category.as_deref());
            print!("{}", views::render_product_list(&products, category.as_deref()));
        }
        Command::Categories => {
            let categories = source.list_categories().await?;
            print!("{}", views::render_categories(&categories));
        }
        Command::Product { id } => {
            let view = ProductDetailView::open(source, *id);
            let state = view.settled().await;

            let image = match (&state, settings.check_images) {
                (LoadState::Loaded(product), true) => {
                    let resolver = ImageResolver::from_config(settings);
                    Some(resolver.resolve(&product.image).await)
                }
                _ => None,
            };
            print!("{}", views::render_product_detail(&state, image.as_ref()));
        }
        Command::Cart {
            add,
            set,
            remove,
            clear,
        } => {
            let commands = CartCommands {
                add: add.clone(),
                set: set.iter().map(|update| (update.id, update.quantity)).collect(),
                remove: remove.clone(),
                clear: *clear,
            };
            let CartSession { cart, skipped } = build_cart(source.as_ref(), &commands).await?;
            for id in skipped {
                eprintln!("⚠️ Product {} not found, skipped", id);
            }

            print!("{}", views::render_cart(&cart.snapshot()));
        }
    }
    Ok(())
}
