use tocspy::toc::generate_id;
use tocspy::BoxResult;

/// Handle the slug command
pub fn handle_slug_command(texts: &[String]) -> BoxResult<()> {
    for text in texts {
        println!("{}", generate_id(text));
    }
    Ok(())
}
