use std::io;
use std::path::Path;

use crossterm::style::Color;

use crate::app::{AppContext, Result, RetrieverError};
use crate::charset::TextEncoding;
use crate::domain::Locator;
use crate::menu::Menu;

/// Pick the decoding for `text`: an explicit label, detection, or ASCII.
pub fn text_encoding(detect: bool, label: Option<&str>) -> Result<TextEncoding> {
    match (detect, label) {
        (_, Some(label)) => TextEncoding::for_label(label)
            .ok_or_else(|| RetrieverError::UnknownEncoding(label.to_string())),
        (true, None) => Ok(TextEncoding::Detect),
        (false, None) => Ok(TextEncoding::Ascii),
    }
}

pub fn text(ctx: &AppContext, url: &str, encoding: TextEncoding, show_final: bool) -> Result<()> {
    let locator = Locator::new(url)?;
    let (text, resolved) = ctx.retriever.fetch_text(&locator, encoding)?;

    print!("{}", text);
    if show_final {
        eprintln!("{}", resolved);
    }
    Ok(())
}

pub fn bytes(ctx: &AppContext, url: &str) -> Result<()> {
    println!("{}", describe_bytes(ctx, &Locator::new(url)?)?);
    Ok(())
}

pub fn download(ctx: &AppContext, url: &str, path: &Path) -> Result<()> {
    let locator = Locator::new(url)?;
    let resolved = ctx.retriever.fetch_to_file(&locator, path)?;
    println!("Saved {} to {}", resolved.address(), path.display());
    Ok(())
}

pub fn resolve(ctx: &AppContext, url: &str) -> Result<()> {
    let locator = Locator::new(url)?;
    let resolved = ctx.retriever.resolve_final_locator(&locator)?;
    println!("{}", resolved.address());
    Ok(())
}

/// Offer the other commands for one URL until the user quits.
pub fn menu(ctx: &AppContext, url: &str) -> Result<()> {
    let locator = Locator::new(url)?;

    let mut menu: Menu<'_, Option<Result<String>>> =
        Menu::new(format!("What should be done with {}?", locator.address()));
    menu.add("Show text (detect encoding)", || {
        Some(
            ctx.retriever
                .fetch_text(&locator, TextEncoding::Detect)
                .map(|(text, _)| text),
        )
    });
    menu.add("Count bytes", || Some(describe_bytes(ctx, &locator)));
    menu.add("Resolve final address", || {
        Some(
            ctx.retriever
                .resolve_final_locator(&locator)
                .map(|resolved| resolved.to_string()),
        )
    });
    menu.set_cancel_with("Quit", Color::DarkGrey, || None);

    let stdin = io::stdin();
    for outcome in menu.show_repeat(stdin.lock(), io::stdout())? {
        match outcome? {
            Some(Ok(message)) => println!("{}\n", message),
            Some(Err(e)) => eprintln!("Error: {}\n", e),
            None => {}
        }
    }

    Ok(())
}

fn describe_bytes(ctx: &AppContext, locator: &Locator) -> Result<String> {
    let (bytes, resolved) = ctx.retriever.fetch_bytes(locator)?;
    Ok(format!("{} bytes from {}", bytes.len(), resolved.address()))
}
