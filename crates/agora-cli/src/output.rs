use agora::render::{DisplayBlock, Segment};
use bat::PrettyPrinter;
use console::style;

/// Render a single-shot result as markdown in the terminal.
pub fn render_markdown(content: &str) {
    let rendered = PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print();

    if rendered.is_err() {
        println!("{content}");
    }
}

/// Print display blocks, one line per block, highlighting link segments
/// and showing their in-app target alongside the label.
pub fn print_blocks(blocks: &[DisplayBlock]) {
    for block in blocks {
        for segment in &block.segments {
            match segment {
                Segment::Text { text } => print!("{text}"),
                Segment::Link { label, target } => {
                    print!(
                        "{} {}",
                        style(label).cyan().underlined(),
                        style(format!("({target})")).dim()
                    );
                }
            }
        }
        println!();
    }
}
