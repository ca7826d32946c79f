use anyhow::{Context, Result};
use cart_checkout::{
    config::Settings,
    error::CheckoutError,
    item::CartLineItem,
    pricing::Voucher,
    screen::OrderScreen,
    service::CartService,
    store::{KeyValueStore, SledStore},
};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::info;

fn init_tracing() {
    tracing_subscriber::fmt::init();
}

#[derive(Parser)]
#[command(
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    #[arg(long, help = "(Optional) Path to a TOML configuration file.")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the cart with its totals.
    Show,
    /// Add an item, merging with an existing line of the same id.
    Add {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    Increase {
        id: String,
    },
    Decrease {
        id: String,
    },
    Remove {
        id: String,
    },
    /// Place an order for the whole cart.
    Checkout {
        #[arg(long, help = "Voucher label shown on the order.")]
        voucher: Option<String>,
        #[arg(long, help = "Discount percentage granted by the voucher.")]
        discount: Option<Decimal>,
    },
    History,
    ClearCart,
    ClearHistory,
}

fn print_cart<S: KeyValueStore>(screen: &OrderScreen, service: &CartService<S>) {
    if service.cart().is_empty() {
        println!("Cart is empty.");
        return;
    }
    for item in service.cart_items() {
        println!(
            "{:>3} x {} ({}) {}",
            item.quantity,
            item.name,
            screen.size_label(item),
            screen.format_amount(screen.line_total(item))
        );
    }
    let summary = screen.summary(service.cart_items());
    println!("Items:    {}", screen.badge_count(service));
    println!("Subtotal: {}", screen.format_amount(summary.subtotal));
    if summary.discount_percent > Decimal::ZERO {
        println!(
            "Discount ({}%): -{}",
            summary.discount_percent,
            screen.format_amount(summary.discount_amount)
        );
    }
    println!("Total:    {}", screen.format_amount(summary.total));
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;

    let store = SledStore::open(&settings.storage.path).with_context(|| {
        format!(
            "failed to open storage at {}",
            settings.storage.path.display()
        )
    })?;
    let mut service = CartService::with_settings(store, &settings);
    let mut screen = OrderScreen::new(settings.display.clone());

    match args.command {
        Command::Show => print_cart(&screen, &service),
        Command::Add {
            id,
            name,
            price,
            quantity,
            size,
            image,
        } => {
            let mut item = CartLineItem::new(id, name, price).set_quantity(quantity);
            if let Some(size) = size {
                item = item.set_size(size);
            }
            if let Some(image) = image {
                item = item.set_image(image);
            }
            service.add_to_cart(item);
            print_cart(&screen, &service);
        }
        Command::Increase { id } => {
            service.increase_quantity(&id);
            print_cart(&screen, &service);
        }
        Command::Decrease { id } => {
            service.decrease_quantity(&id);
            print_cart(&screen, &service);
        }
        Command::Remove { id } => {
            service.remove_item(&id);
            print_cart(&screen, &service);
        }
        Command::Checkout { voucher, discount } => {
            if voucher.is_some() || discount.is_some() {
                screen.apply_voucher(Voucher::new(
                    voucher.unwrap_or_default(),
                    discount.unwrap_or_default(),
                ));
            }
            print_cart(&screen, &service);
            match screen.checkout(&mut service) {
                Ok(receipt) => {
                    for notice in [&receipt.confirmation, &receipt.notice] {
                        println!("{}: {}", notice.title, notice.message);
                    }
                    println!(
                        "Order {} placed at {} for {}",
                        receipt.order.id(),
                        receipt.order.date(),
                        screen.format_amount(receipt.order.total())
                    );
                }
                Err(err @ CheckoutError::EmptyCart) => {
                    let notice = err.notice();
                    println!("{}: {}", notice.title, notice.message);
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::History => {
            let history = service.order_history();
            if history.is_empty() {
                println!("No orders yet.");
            }
            for order in history.orders() {
                println!(
                    "{}  {}  {} item(s)  {}{}",
                    order.date(),
                    order.id(),
                    order.item_count(),
                    screen.format_amount(order.total()),
                    order
                        .voucher()
                        .map(|v| format!("  [{v}]"))
                        .unwrap_or_default()
                );
            }
        }
        Command::ClearCart => {
            service.clear_cart();
            info!("cart cleared from the command line");
        }
        Command::ClearHistory => {
            service.clear_order_history();
            info!("order history cleared from the command line");
        }
    }

    Ok(())
}
