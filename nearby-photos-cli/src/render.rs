//! Terminal rendering of presentation snapshots.

use nearby_photos::presentation::{PresentationAdapter, PresentationSnapshot};

/// Prints each snapshot to stdout.
#[derive(Default)]
pub struct TerminalRenderer {
    last: Option<String>,
}

impl PresentationAdapter for TerminalRenderer {
    fn render(&mut self, snapshot: &PresentationSnapshot) {
        let text = format_snapshot(snapshot);
        // Identical consecutive frames are printed once.
        if self.last.as_deref() != Some(text.as_str()) {
            print!("{}", text);
            self.last = Some(text);
        }
    }
}

/// Plain-text rendering of a snapshot.
pub fn format_snapshot(snapshot: &PresentationSnapshot) -> String {
    let mut out = String::new();

    if let Some(label) = snapshot.coordinates_label() {
        out.push_str(&label);
        out.push('\n');
    }
    out.push_str(&snapshot.status_line());
    out.push('\n');

    for (index, item) in snapshot.items.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", index + 1, item.display_label()));
        out.push_str(&format!("     {}\n", item.image_ref));
    }

    out
}
