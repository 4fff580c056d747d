//! Convert command

use crate::affiliate::LinkRewriter;
use crate::config::get_config;
use crate::interfaces::cli::CliError;

/// Convert one link and print it on stdout
///
/// The short-link HEAD request (if any) blocks the current thread; there is
/// no async runtime in one-shot CLI mode.
pub fn convert_link(url: &str, affiliate_id: Option<&str>) -> Result<(), CliError> {
    let config = get_config();
    let rewriter = LinkRewriter::from_config(&config.affiliate);

    let converted = rewriter.rewrite(url, affiliate_id)?;
    println!("{}", converted);
    Ok(())
}
