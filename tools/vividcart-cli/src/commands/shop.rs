//! Interactive shopping session.

use anyhow::{bail, Context as _, Result};
use console::style;
use dialoguer::Input;
use tracing::info;
use vividcart_commerce::cart::CartAction;
use vividcart_commerce::catalog::Catalog;
use vividcart_commerce::checkout::{
    CheckoutCollaborator, CheckoutOutcome, CheckoutRequest, DemoCheckout,
};
use vividcart_commerce::ids::ProductId;
use vividcart_commerce::replay::{cart_action, ReplayRecorder, Session, StoreEvent};
use vividcart_commerce::search::{SearchQuery, SearchResults};
use vividcart_commerce::store::CartStore;

use super::ShopArgs;
use crate::context::Context;

/// A line typed at the shop prompt.
#[derive(Debug, PartialEq, Eq)]
enum ShopCommand {
    /// Something that changes the session and gets recorded.
    Event(StoreEvent),
    /// Show the cart.
    Cart,
    /// Show products for the current search.
    List,
    /// Show the command reference.
    Help,
    /// End the session.
    Quit,
}

const HELP: &[(&str, &str)] = &[
    ("list", "show products matching the current search"),
    ("search <text>", "filter products by name (empty clears)"),
    ("add <id>", "add one unit of a product"),
    ("inc <id> / dec <id>", "change quantity (never below 1)"),
    ("rm <id>", "remove a product from the cart"),
    ("cart", "show the cart and subtotal"),
    ("clear", "empty the cart"),
    ("checkout", "proceed to checkout"),
    ("quit", "end the session"),
];

/// Run the shop command.
pub fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let store = CartStore::new();
    let collaborator = DemoCheckout;
    let mut recorder = ReplayRecorder::new();
    let mut query = SearchQuery::default();

    let quiet = ctx.output.is_json();
    store.subscribe(move |_cart, action| {
        if let CartAction::AddItem(product) = action {
            if !quiet {
                println!("{} Added to cart: {}", style("✓").green(), product.name);
            }
        }
    });

    ctx.output.header("VividCart");
    show_products(ctx, &catalog, &query);
    ctx.output.info("Type `help` for commands.");

    loop {
        let line: String = Input::new()
            .with_prompt(format!("cart ({})", store.item_count()))
            .allow_empty(true)
            .interact_text()
            .context("Failed to read command")?;

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                ctx.output.warn(&e.to_string());
                continue;
            }
        };

        match command {
            ShopCommand::Quit => break,
            ShopCommand::Help => {
                for (usage, what) in HELP {
                    ctx.output.kv(usage, what);
                }
            }
            ShopCommand::List => show_products(ctx, &catalog, &query),
            ShopCommand::Cart => ctx.output.cart(&store.summary()),
            ShopCommand::Event(event) => handle_event(
                ctx,
                &catalog,
                &store,
                &collaborator,
                &mut recorder,
                &mut query,
                event,
            )?,
        }
    }

    let session = Session {
        cart: store.snapshot(),
        query,
    };

    if ctx.output.is_json() {
        ctx.output.json(&session.cart.summary());
    } else {
        ctx.output.header("Your Cart");
        ctx.output.cart(&session.cart.summary());
    }

    if let Some(path) = args.record {
        let path = ctx.resolve_path(&path);
        let events = recorder.len();
        let recording = recorder.finalize(&session);
        std::fs::write(&path, recording.to_json()?)
            .with_context(|| format!("Failed to write recording: {}", path.display()))?;
        info!(path = %path.display(), events, "session recorded");
        ctx.output
            .success(&format!("Recorded {} events to {}", events, path.display()));
    }

    Ok(())
}

/// Apply one session event and record it.
///
/// A checkout that empties the cart is followed by a recorded `Clear`, so
/// the recording replays to the cart the customer ended with.
fn handle_event(
    ctx: &Context,
    catalog: &Catalog,
    store: &CartStore,
    collaborator: &impl CheckoutCollaborator,
    recorder: &mut ReplayRecorder,
    query: &mut SearchQuery,
    event: StoreEvent,
) -> Result<()> {
    let mut cleared = false;
    match &event {
        StoreEvent::Search { query: text } => {
            *query = SearchQuery::new(text.as_str());
            show_products(ctx, catalog, query);
        }
        StoreEvent::Checkout => cleared = checkout(ctx, store, collaborator)?,
        StoreEvent::Add { product } if !catalog.contains(product) => {
            ctx.output.warn(&format!("No product with id `{}`", product));
        }
        _ => {
            if let Some(action) = cart_action(catalog, &event) {
                ctx.output.debug(&format!("dispatch {}", action.name()));
                store.dispatch(action);
            }
        }
    }

    recorder.record(event);
    if cleared {
        recorder.record(StoreEvent::Clear);
    }
    Ok(())
}

fn show_products(ctx: &Context, catalog: &Catalog, query: &SearchQuery) {
    let results = SearchResults::run(catalog, query.clone());
    if results.is_empty() {
        ctx.output
            .info(&format!("No products match \"{}\"", query.as_str()));
        return;
    }
    ctx.output.products(results.products.iter().map(|p| p.as_ref()));
    ctx.output.info(&results.count_label());
}

fn checkout(
    ctx: &Context,
    store: &CartStore,
    collaborator: &impl CheckoutCollaborator,
) -> Result<bool> {
    let request = CheckoutRequest::from_cart(&store.snapshot());
    let outcome = collaborator.begin_checkout(&request)?;

    match &outcome {
        CheckoutOutcome::NotConnected { notice } => ctx.output.info(notice),
        CheckoutOutcome::Accepted { redirect } => {
            ctx.output.success(&format!(
                "Checkout started for {} ({} items)",
                request.subtotal, request.item_count
            ));
            if let Some(url) = redirect {
                ctx.output.kv("Continue at", url);
            }
        }
    }

    let clear = ctx.config.checkout.clear_policy.should_clear(&outcome);
    if clear {
        store.dispatch(CartAction::Clear);
    }
    Ok(clear)
}

/// Parse a prompt line. Blank lines parse to `None`.
fn parse_command(line: &str) -> Result<Option<ShopCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let product = || -> Result<ProductId> {
        if rest.is_empty() {
            bail!("`{}` needs a product id", verb);
        }
        Ok(ProductId::new(rest))
    };

    let command = match verb.to_lowercase().as_str() {
        "add" | "a" => ShopCommand::Event(StoreEvent::Add { product: product()? }),
        "inc" | "+" => ShopCommand::Event(StoreEvent::Increment { product: product()? }),
        "dec" | "-" => ShopCommand::Event(StoreEvent::Decrement { product: product()? }),
        "rm" | "remove" => ShopCommand::Event(StoreEvent::Remove { product: product()? }),
        "search" | "s" | "/" => ShopCommand::Event(StoreEvent::Search {
            query: rest.to_string(),
        }),
        "checkout" => ShopCommand::Event(StoreEvent::Checkout),
        "clear" => ShopCommand::Event(StoreEvent::Clear),
        "cart" | "c" => ShopCommand::Cart,
        "list" | "ls" => ShopCommand::List,
        "help" | "?" => ShopCommand::Help,
        "quit" | "exit" | "q" => ShopCommand::Quit,
        other => bail!("Unknown command `{}` (try `help`)", other),
    };

    Ok(Some(command))
}
