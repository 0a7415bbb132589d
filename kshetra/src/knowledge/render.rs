//! Text dump of the knowledge map for logs and the CLI.

use super::KnowledgeMap;
use crate::core::{Cell, Pose};

impl KnowledgeMap {
    /// Render a `width` x `height` window anchored at the origin.
    ///
    /// `#` sensed obstacle, `.` open, `?` frontier, `*` claimed, `x`
    /// unreachable, robot heading glyphs on robot cells, space for cells not
    /// yet discovered.
    pub fn render_ascii(&self, width: i32, height: i32, robots: &[Pose]) -> String {
        let mut out = String::with_capacity(((width.max(0) + 1) * height.max(0)) as usize);
        for y in 0..height {
            for x in 0..width {
                let cell = Cell::new(x, y);
                let glyph = match robots.iter().find(|pose| pose.cell == cell) {
                    Some(pose) => pose.heading.as_char(),
                    None => self.status(cell).map_or(' ', |s| s.as_char()),
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}
