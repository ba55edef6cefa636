//! Tokens command
//!
//! Usage: pocketlog tokens <TEMPLATE> [--json]

use clap::Args;
use pocketlog_core::{log_op_end, log_op_start, Template, Token};
use std::time::Instant;

#[derive(Debug, Args)]
pub struct TokensArgs {
    /// Message template to inspect
    pub template: String,

    /// Print tokens as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute tokens command
pub fn execute(args: TokensArgs) -> Result<(), Box<dyn std::error::Error>> {
    let started = Instant::now();
    log_op_start!("tokens", template_len = args.template.len());

    let template = Template::parse(&args.template);
    if args.json {
        let tokens: Vec<serde_json::Value> = template.tokens().iter().map(token_json).collect();
        println!("{}", serde_json::Value::Array(tokens));
    } else {
        for (index, token) in template.tokens().iter().enumerate() {
            let span = token.span();
            println!(
                "{}\t{}\t{}\t{}..{}",
                index,
                token.name(),
                token.format_spec().unwrap_or("-"),
                span.start,
                span.end
            );
        }
    }

    log_op_end!(
        "tokens",
        duration_ms = started.elapsed().as_millis() as u64,
        token_count = template.tokens().len()
    );
    Ok(())
}

fn token_json(token: &Token) -> serde_json::Value {
    let span = token.span();
    serde_json::json!({
        "name": token.name(),
        "format_spec": token.format_spec(),
        "match_text": token.match_text(),
        "start": span.start,
        "end": span.end,
    })
}
