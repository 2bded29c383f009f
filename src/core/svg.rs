// SVG markup helpers: raster size detection, a small document builder and
// the loader's error type.

use super::constants::{SVG_DEFAULT_SIZE_PX, SVG_NS};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TextureError {
    #[error("fetch {path} failed: {reason}")]
    Fetch { path: String, reason: String },
    #[error("fetch {path} returned HTTP {status}")]
    Status { path: String, status: u16 },
    #[error("svg decode failed: {0}")]
    Decode(String),
    #[error("raster canvas unavailable: {0}")]
    Canvas(String),
    #[error("raster {width}x{height} exceeds the {max}px texture limit")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Map an HTTP status to the loader's error path (anything outside 2xx fails).
#[inline]
pub fn check_fetch_status(path: &str, status: u16) -> Result<(), TextureError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(TextureError::Status {
            path: path.to_string(),
            status,
        })
    }
}

/// Reject sizes the GPU cannot allocate as a 2D texture.
#[inline]
pub fn check_texture_size(width: u32, height: u32, max: u32) -> Result<(), TextureError> {
    if width <= max && height <= max {
        Ok(())
    } else {
        Err(TextureError::TooLarge { width, height, max })
    }
}

/// Raster size declared on the root `<svg>` element.
///
/// Attribute values are read like `parseInt` (`"512px"` is 512); missing,
/// unparsable or non-positive values fall back to the default size.
pub fn svg_dimensions(markup: &str) -> (u32, u32) {
    let attrs = root_svg_attributes(markup).unwrap_or_default();
    let lookup = |name: &str| {
        attrs
            .iter()
            .find(|(k, _)| k == name)
            .and_then(|(_, v)| leading_int(v))
            .filter(|v| *v > 0)
            .map(|v| v.min(u32::MAX as i64) as u32)
            .unwrap_or(SVG_DEFAULT_SIZE_PX)
    };
    (lookup("width"), lookup("height"))
}

/// Shrink a raster size to fit `max_side` on both axes, keeping the aspect
/// ratio. Sizes already within the limit come back unchanged.
pub fn fit_raster_size(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let max_side = max_side.max(1);
    let (width, height) = (width.max(1), height.max(1));
    let longest = width.max(height);
    if longest <= max_side {
        return (width, height);
    }
    let scale = max_side as f64 / longest as f64;
    let fit = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, max_side);
    (fit(width), fit(height))
}

fn leading_int(value: &str) -> Option<i64> {
    let s = value.trim_start();
    let (neg, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    let n: i64 = digits.parse().ok()?;
    Some(if neg { -n } else { n })
}

/// Byte offset just past `<svg` of the first real `<svg` tag.
///
/// Comments, processing instructions, `<!DOCTYPE>`/CDATA sections and other
/// tags are stepped over whole, so markup quoted inside them never matches.
fn root_svg_tag_start(markup: &str) -> Option<usize> {
    let mut pos = 0;
    loop {
        let i = pos + markup[pos..].find('<')?;
        let rest = &markup[i..];
        let skip_to = |close: &str, from: usize| {
            rest[from..].find(close).map(|e| i + from + e + close.len())
        };
        pos = if rest.starts_with("<!--") {
            skip_to("-->", 4)?
        } else if rest.starts_with("<![CDATA[") {
            skip_to("]]>", 9)?
        } else if rest.starts_with("<?") {
            skip_to("?>", 2)?
        } else if rest.starts_with("<!") {
            skip_to(">", 2)?
        } else if rest.starts_with("<svg")
            && matches!(rest[4..].chars().next(), Some(c) if c.is_whitespace() || c == '>' || c == '/')
        {
            return Some(i + 4);
        } else {
            i + 1
        };
    }
}

fn root_svg_attributes(markup: &str) -> Option<Vec<(String, String)>> {
    let start = root_svg_tag_start(markup)?;
    let tag = &markup[start..];
    let mut attrs = Vec::new();
    let mut chars = tag.char_indices().peekable();
    loop {
        while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
            chars.next();
        }
        let (name_start, c) = *chars.peek()?;
        if c == '>' || c == '/' {
            return Some(attrs);
        }
        let mut name_end = name_start;
        while let Some(&(i, c)) = chars.peek() {
            if c == '=' || c == '>' || c == '/' || c.is_whitespace() {
                break;
            }
            name_end = i + c.len_utf8();
            chars.next();
        }
        let name = tag[name_start..name_end].to_string();
        while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
            chars.next();
        }
        if !matches!(chars.peek(), Some((_, '='))) {
            // valueless attribute
            if name.is_empty() {
                chars.next();
            } else {
                attrs.push((name, String::new()));
            }
            continue;
        }
        chars.next();
        while matches!(chars.peek(), Some((_, c)) if c.is_whitespace()) {
            chars.next();
        }
        let (q_at, quote) = chars.next()?;
        let value = if quote == '"' || quote == '\'' {
            let vstart = q_at + 1;
            let mut vend = vstart;
            for (i, c) in chars.by_ref() {
                if c == quote {
                    vend = i;
                    break;
                }
            }
            tag[vstart..vend].to_string()
        } else {
            let mut vend = q_at + quote.len_utf8();
            while let Some(&(i, c)) = chars.peek() {
                if c.is_whitespace() || c == '>' || c == '/' {
                    break;
                }
                vend = i + c.len_utf8();
                chars.next();
            }
            tag[q_at..vend].to_string()
        };
        attrs.push((name, value));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SvgNode {
    Element(SvgElement),
    Text(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SvgElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<SvgNode>,
}

impl SvgElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn append(&mut self, child: SvgElement) -> &mut SvgElement {
        self.children.push(SvgNode::Element(child));
        match self.children.last_mut() {
            Some(SvgNode::Element(el)) => el,
            _ => unreachable!("just pushed an element"),
        }
    }

    pub fn append_text(&mut self, text: impl Into<String>) {
        self.children.push(SvgNode::Text(text.into()));
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (k, v) in &self.attributes {
            out.push(' ');
            out.push_str(k);
            out.push_str("=\"");
            escape_into(v, true, out);
            out.push('"');
        }
        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                SvgNode::Element(el) => el.write_markup(out),
                SvgNode::Text(t) => escape_into(t, false, out),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

fn escape_into(s: &str, attribute: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Programmatically built SVG: a root `<svg>` with declared size and namespace.
#[derive(Clone, Debug, PartialEq)]
pub struct SvgDocument {
    root: SvgElement,
}

impl SvgDocument {
    pub fn new(width: u32, height: u32) -> Self {
        let root = SvgElement::new("svg")
            .attr("width", width)
            .attr("height", height)
            .attr("xmlns", SVG_NS);
        Self { root }
    }

    /// Build a document by handing the empty root and the namespace to `draw`.
    pub fn build(width: u32, height: u32, draw: impl FnOnce(&mut SvgElement, &str)) -> Self {
        let mut doc = Self::new(width, height);
        draw(&mut doc.root, SVG_NS);
        doc
    }

    pub fn root(&self) -> &SvgElement {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut SvgElement {
        &mut self.root
    }

    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.root.write_markup(&mut out);
        out
    }
}
