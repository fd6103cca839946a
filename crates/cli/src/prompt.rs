//! Interactive search prompt.
//!
//! Reads commands from stdin, feeds them to a mounted search session and
//! prints every snapshot change.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::debug;

use movielookup_core::{
    ResultSnapshot, SearchClient, SearchSession, TokioScheduler, ViewportPosition, ViewportSignal,
};

use crate::commands::{self, PromptCommand, HELP};
use crate::render::{render_update, ROW_HEIGHT};

/// Rows treated as visible when the prompt asks for more results.
const VISIBLE_ROWS: f64 = 20.0;

pub async fn run(client: Arc<dyn SearchClient>) -> Result<()> {
    let viewport = ViewportSignal::new();
    let session = SearchSession::mount(client, Arc::new(TokioScheduler::new()), &viewport);

    let renderer = tokio::spawn(render_loop(session.subscribe()));

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match commands::parse(&line) {
            Ok(PromptCommand::Term(term)) => session.set_search_term(term),
            Ok(PromptCommand::Year(year)) => session.set_year(year),
            Ok(PromptCommand::Type(title_type)) => session.set_title_type(title_type),
            Ok(PromptCommand::More) => {
                let rows = session.snapshot().movies.len() as f64;
                viewport.emit(ViewportPosition::at_bottom(
                    VISIBLE_ROWS * ROW_HEIGHT,
                    rows * ROW_HEIGHT,
                ));
            }
            Ok(PromptCommand::Help) => println!("{}", HELP),
            Ok(PromptCommand::Quit) => break,
            Err(e) => println!("{}", e),
        }
    }

    debug!("Leaving search prompt");
    drop(session);
    renderer.abort();
    Ok(())
}

async fn render_loop(mut snapshots: watch::Receiver<ResultSnapshot>) {
    let mut previous = snapshots.borrow_and_update().clone();
    while snapshots.changed().await.is_ok() {
        let next = snapshots.borrow_and_update().clone();
        for line in render_update(&previous, &next) {
            println!("{}", line);
        }
        previous = next;
    }
}
