use crate::graphics::Color;
use crate::writer::literal_bytes;

/// Bézier control-point factor for approximating a quarter circle.
const KAPPA: f64 = 0.5523;

/// Format a coordinate value for PDF content streams.
pub(crate) fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        let s = s.trim_end_matches('0');
        let s = s.trim_end_matches('.');
        if s == "-0" {
            "0".to_string()
        } else {
            s.to_string()
        }
    }
}

/// Append-only builder for one page's content stream. All coordinates
/// are absolute page coordinates.
#[derive(Debug, Default, Clone)]
pub(crate) struct ContentStream {
    buf: Vec<u8>,
}

impl ContentStream {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    fn op(&mut self, line: &str) {
        self.buf.extend_from_slice(line.as_bytes());
        self.buf.push(b'\n');
    }

    pub(crate) fn save(&mut self) {
        self.op("q");
    }

    pub(crate) fn restore(&mut self) {
        self.op("Q");
    }

    pub(crate) fn fill_color(&mut self, c: Color) {
        self.op(&format!(
            "{} {} {} rg",
            format_coord(c.r),
            format_coord(c.g),
            format_coord(c.b)
        ));
    }

    pub(crate) fn stroke_color(&mut self, c: Color) {
        self.op(&format!(
            "{} {} {} RG",
            format_coord(c.r),
            format_coord(c.g),
            format_coord(c.b)
        ));
    }

    pub(crate) fn line_width(&mut self, w: f64) {
        self.op(&format!("{} w", format_coord(w)));
    }

    /// Concatenate a transformation matrix.
    pub(crate) fn transform(&mut self, m: [f64; 6]) {
        let parts: Vec<String> = m.iter().map(|v| format_coord(*v)).collect();
        self.op(&format!("{} cm", parts.join(" ")));
    }

    /// Filled rectangle with the bottom-left corner at (x, y).
    pub(crate) fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.op(&format!(
            "{} {} {} {} re",
            format_coord(x),
            format_coord(y),
            format_coord(w),
            format_coord(h)
        ));
        self.op("f");
    }

    pub(crate) fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.op(&format!("{} {} m", format_coord(x1), format_coord(y1)));
        self.op(&format!("{} {} l", format_coord(x2), format_coord(y2)));
        self.op("S");
    }

    /// Stroke a rectangle with rounded corners; (left, top) is the
    /// top-left corner.
    pub(crate) fn stroke_rounded_rect(&mut self, left: f64, top: f64, w: f64, h: f64, r: f64) {
        let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
        let right = left + w;
        let bottom = top - h;
        let k = r * KAPPA;
        let c = format_coord;

        self.op(&format!("{} {} m", c(left + r), c(top)));
        self.op(&format!("{} {} l", c(right - r), c(top)));
        self.op(&format!(
            "{} {} {} {} {} {} c",
            c(right - r + k),
            c(top),
            c(right),
            c(top - r + k),
            c(right),
            c(top - r)
        ));
        self.op(&format!("{} {} l", c(right), c(bottom + r)));
        self.op(&format!(
            "{} {} {} {} {} {} c",
            c(right),
            c(bottom + r - k),
            c(right - r + k),
            c(bottom),
            c(right - r),
            c(bottom)
        ));
        self.op(&format!("{} {} l", c(left + r), c(bottom)));
        self.op(&format!(
            "{} {} {} {} {} {} c",
            c(left + r - k),
            c(bottom),
            c(left),
            c(bottom + r - k),
            c(left),
            c(bottom + r)
        ));
        self.op(&format!("{} {} l", c(left), c(top - r)));
        self.op(&format!(
            "{} {} {} {} {} {} c",
            c(left),
            c(top - r + k),
            c(left + r - k),
            c(top),
            c(left + r),
            c(top)
        ));
        self.op("h");
        self.op("S");
    }

    pub(crate) fn begin_text(&mut self) {
        self.op("BT");
    }

    pub(crate) fn end_text(&mut self) {
        self.op("ET");
    }

    pub(crate) fn set_font(&mut self, resource: &str, size: f64) {
        self.op(&format!("/{} {} Tf", resource, format_coord(size)));
    }

    /// Place the next line's baseline origin at (x, y).
    pub(crate) fn text_position(&mut self, x: f64, y: f64) {
        self.op(&format!("1 0 0 1 {} {} Tm", format_coord(x), format_coord(y)));
    }

    /// Show a WinAnsi-encoded string.
    pub(crate) fn show_bytes(&mut self, encoded: &[u8]) {
        self.buf.extend_from_slice(&literal_bytes(encoded));
        self.op(" Tj");
    }

    /// Show a pre-encoded hex string such as `<0048006C>`.
    pub(crate) fn show_hex(&mut self, hex: &str) {
        self.op(&format!("{} Tj", hex));
    }

    /// Paint an image XObject scaled to `w` x `h` with its bottom-left
    /// corner at (x, y).
    pub(crate) fn draw_image(&mut self, resource: &str, x: f64, y: f64, w: f64, h: f64) {
        self.save();
        self.transform([w, 0.0, 0.0, h, x, y]);
        self.op(&format!("/{} Do", resource));
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(cs: &ContentStream) -> String {
        String::from_utf8_lossy(cs.as_bytes()).into_owned()
    }

    #[test]
    fn format_coord_trims_zeros() {
        assert_eq!(format_coord(36.0), "36");
        assert_eq!(format_coord(12.5), "12.5");
        assert_eq!(format_coord(0.33333), "0.3333");
        assert_eq!(format_coord(-0.00001), "0");
    }

    #[test]
    fn text_ops_escape_literals() {
        let mut cs = ContentStream::new();
        cs.begin_text();
        cs.set_font("F1", 12.0);
        cs.text_position(36.0, 700.0);
        cs.show_bytes(b"a (b)");
        cs.end_text();
        assert_eq!(text(&cs), "BT\n/F1 12 Tf\n1 0 0 1 36 700 Tm\n(a \\(b\\)) Tj\nET\n");
    }

    #[test]
    fn rounded_rect_starts_after_corner_and_closes() {
        let mut cs = ContentStream::new();
        cs.stroke_rounded_rect(36.0, 706.0, 266.0, 150.0, 6.0);
        let out = text(&cs);
        assert!(out.starts_with("42 706 m\n296 706 l\n"));
        assert!(out.ends_with("h\nS\n"));
        assert_eq!(out.matches(" c\n").count(), 4);
    }

    #[test]
    fn image_is_wrapped_in_its_own_state() {
        let mut cs = ContentStream::new();
        cs.draw_image("Im1", 36.0, 100.0, 200.0, 50.0);
        assert_eq!(text(&cs), "q\n200 0 0 50 36 100 cm\n/Im1 Do\nQ\n");
    }
}
