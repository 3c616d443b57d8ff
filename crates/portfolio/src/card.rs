//! The `<project-card>` component.
//!
//! A card is a pure function of ten string attributes. [`render`] turns a
//! [`CardProps`] into the card's shadow markup, style included, so the
//! markup can be embedded anywhere without leaking or inheriting styles.
//! [`ProjectCard`] is the element wrapper: it holds attributes, re-renders
//! when a recognised attribute changes while attached, and serializes
//! itself as a custom element with a declarative shadow root.

use std::collections::BTreeMap;

use crate::record::ProjectRecord;

/// Custom element tag name.
pub const TAG_NAME: &str = "project-card";

/// Attribute names the card reacts to, in template order.
pub const OBSERVED_ATTRIBUTES: [&str; 10] = [
    "title",
    "image-src",
    "image-alt",
    "description",
    "tech",
    "link-href",
    "link-label",
    "date",
    "role",
    "keywords",
];

/// Link target used when `link-href` is unset.
pub const DEFAULT_LINK_HREF: &str = "#";

/// Link text used when `link-label` is unset.
pub const DEFAULT_LINK_LABEL: &str = "Learn more →";

const META_SEPARATOR: &str = " • ";

const CARD_STYLE: &str = "\
:host{display:block}\
.project-card{display:flex;flex-direction:column;border:1px solid var(--card-border,#ddd);\
border-radius:12px;overflow:hidden;background:var(--card-bg,#fff);color:var(--card-fg,#222)}\
.project-card__media{display:block}\
.project-card__image{display:block;width:100%;aspect-ratio:4/3;object-fit:cover}\
.project-card__body{display:flex;flex-direction:column;gap:.5rem;padding:1rem}\
.project-card__title{margin:0;font-size:1.25rem}\
.project-card__meta,.project-card__tech{margin:0;font-size:.85rem;opacity:.75}\
.project-card__description{margin:0}\
.project-card__link{margin-top:auto;font-weight:600}\
[hidden]{display:none!important}";

/// The attribute set a card renders from. Absent attributes are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardProps {
    /// `title`
    pub title: String,
    /// `image-src`
    pub image_src: String,
    /// `image-alt`
    pub image_alt: String,
    /// `description`
    pub description: String,
    /// `tech`
    pub tech: String,
    /// `link-href`
    pub link_href: String,
    /// `link-label`
    pub link_label: String,
    /// `date`
    pub date: String,
    /// `role`
    pub role: String,
    /// `keywords`
    pub keywords: String,
}

impl CardProps {
    /// Build props from `(attribute, value)` pairs. Unknown names are ignored.
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut props = Self::default();
        for (name, value) in attributes {
            props.set_attribute(name, value);
        }
        props
    }

    /// Set one attribute by its hyphenated name.
    ///
    /// Returns `false` (and changes nothing) if the name is not observed.
    pub fn set_attribute(&mut self, name: &str, value: &str) -> bool {
        match self.field_mut(name) {
            Some(field) => {
                value.clone_into(field);
                true
            }
            None => false,
        }
    }

    /// Read one attribute by its hyphenated name.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        let value = match name {
            "title" => &self.title,
            "image-src" => &self.image_src,
            "image-alt" => &self.image_alt,
            "description" => &self.description,
            "tech" => &self.tech,
            "link-href" => &self.link_href,
            "link-label" => &self.link_label,
            "date" => &self.date,
            "role" => &self.role,
            "keywords" => &self.keywords,
            _ => return None,
        };
        Some(value)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut String> {
        let field = match name {
            "title" => &mut self.title,
            "image-src" => &mut self.image_src,
            "image-alt" => &mut self.image_alt,
            "description" => &mut self.description,
            "tech" => &mut self.tech,
            "link-href" => &mut self.link_href,
            "link-label" => &mut self.link_label,
            "date" => &mut self.date,
            "role" => &mut self.role,
            "keywords" => &mut self.keywords,
            _ => return None,
        };
        Some(field)
    }

    /// `date • role • keywords`, skipping empty parts.
    #[must_use]
    pub fn meta_line(&self) -> String {
        [&self.date, &self.role, &self.keywords]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(META_SEPARATOR)
    }
}

impl From<&ProjectRecord> for CardProps {
    fn from(record: &ProjectRecord) -> Self {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        Self {
            title: text(&record.title),
            image_src: text(&record.image_src),
            image_alt: text(&record.image_alt),
            description: text(&record.description),
            tech: text(&record.tech),
            link_href: text(&record.link_href),
            link_label: text(&record.link_label),
            date: text(&record.date),
            role: text(&record.role),
            keywords: text(&record.keywords),
        }
    }
}

/// Render the card's shadow markup.
#[must_use]
pub fn render(props: &CardProps) -> String {
    let meta = props.meta_line();
    let href = non_empty_or(&props.link_href, DEFAULT_LINK_HREF);
    let label = non_empty_or(&props.link_label, DEFAULT_LINK_LABEL);
    let alt = non_empty_or(&props.image_alt, &props.title);
    let tech = if props.tech.trim().is_empty() {
        String::new()
    } else {
        format!("Tech: {}", escape(&props.tech))
    };

    format!(
        concat!(
            "<style>{style}</style>",
            "<article class=\"project-card\">",
            "<picture class=\"project-card__media\">",
            "<img class=\"project-card__image\" src=\"{src}\" alt=\"{alt}\" loading=\"lazy\" decoding=\"async\">",
            "</picture>",
            "<div class=\"project-card__body\">",
            "<h2 class=\"project-card__title\">{title}</h2>",
            "<p class=\"project-card__meta\"{meta_hidden}>{meta}</p>",
            "<p class=\"project-card__description\"{description_hidden}>{description}</p>",
            "<p class=\"project-card__tech\"{tech_hidden}>{tech}</p>",
            "<a class=\"project-card__link\" href=\"{href}\" target=\"_blank\" rel=\"noopener noreferrer\">{label}</a>",
            "</div>",
            "</article>",
        ),
        style = CARD_STYLE,
        src = escape(&props.image_src),
        alt = escape(alt),
        title = escape(&props.title),
        meta_hidden = hidden_if(meta.is_empty()),
        meta = escape(&meta),
        description_hidden = hidden_if(props.description.trim().is_empty()),
        description = escape(&props.description),
        tech_hidden = hidden_if(tech.is_empty()),
        tech = tech,
        href = escape(href),
        label = escape(label),
    )
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn hidden_if(empty: bool) -> &'static str {
    if empty {
        " hidden"
    } else {
        ""
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// A `<project-card>` element instance.
#[derive(Debug, Clone, Default)]
pub struct ProjectCard {
    props: CardProps,
    data: BTreeMap<String, String>,
    shadow: String,
    connected: bool,
    render_count: usize,
}

impl ProjectCard {
    /// Create a detached card with no attributes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached card carrying a record's fields as attributes.
    #[must_use]
    pub fn from_record(record: &ProjectRecord) -> Self {
        Self {
            props: CardProps::from(record),
            ..Self::default()
        }
    }

    /// Set an attribute.
    ///
    /// `data-*` attributes annotate the host element only. Observed
    /// attributes re-render immediately when the card is attached. Anything
    /// else is ignored.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if name.starts_with("data-") {
            self.data.insert(name.to_string(), value.to_string());
        } else if self.props.set_attribute(name, value) && self.connected {
            self.render();
        }
    }

    /// Read an observed or `data-*` attribute.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        if name.starts_with("data-") {
            self.data.get(name).map(String::as_str)
        } else {
            self.props.get_attribute(name)
        }
    }

    /// Attach the card, rendering it for the first time.
    pub fn connect(&mut self) {
        if !self.connected {
            self.connected = true;
            self.render();
        }
    }

    /// Whether the card is attached.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Current attribute values.
    #[must_use]
    pub fn props(&self) -> &CardProps {
        &self.props
    }

    /// Rendered shadow markup; empty until the card is attached.
    #[must_use]
    pub fn shadow_html(&self) -> &str {
        &self.shadow
    }

    /// How many times the card has rendered.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }

    /// Serialize as a custom element with a declarative shadow root.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut attributes = String::new();
        for name in OBSERVED_ATTRIBUTES {
            if let Some(value) = self.props.get_attribute(name).filter(|v| !v.is_empty()) {
                attributes.push_str(&format!(" {name}=\"{}\"", escape(value)));
            }
        }
        for (name, value) in &self.data {
            attributes.push_str(&format!(" {name}=\"{}\"", escape(value)));
        }

        format!(
            "<{TAG_NAME}{attributes}><template shadowrootmode=\"open\">{}</template></{TAG_NAME}>",
            self.shadow
        )
    }

    fn render(&mut self) {
        self.shadow = render(&self.props);
        self.render_count += 1;
    }
}

/// An ordered collection of attached cards.
#[derive(Debug, Clone, Default)]
pub struct CardContainer {
    cards: Vec<ProjectCard>,
}

impl CardContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents, attaching every new card.
    pub fn replace(&mut self, cards: Vec<ProjectCard>) {
        self.cards = cards;
        for card in &mut self.cards {
            card.connect();
        }
    }

    /// The cards in display order.
    #[must_use]
    pub fn cards(&self) -> &[ProjectCard] {
        &self.cards
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the container is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Serialize every card, one per line.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.cards
            .iter()
            .map(ProjectCard::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> CardProps {
        CardProps::from_attributes(pairs.iter().copied())
    }

    #[test]
    fn test_title_only_hides_optional_lines() {
        let html = render(&props(&[("title", "Alpha")]));

        assert!(html.contains("<h2 class=\"project-card__title\">Alpha</h2>"));
        assert!(html.contains("<p class=\"project-card__meta\" hidden></p>"));
        assert!(html.contains("<p class=\"project-card__description\" hidden></p>"));
        assert!(html.contains("<p class=\"project-card__tech\" hidden></p>"));
        assert!(html.contains(
            "href=\"#\" target=\"_blank\" rel=\"noopener noreferrer\">Learn more →</a>"
        ));
    }

    #[test]
    fn test_image_alt_falls_back_to_title() {
        let html = render(&props(&[("title", "Alpha"), ("image-src", "a.png")]));
        assert!(html.contains("src=\"a.png\" alt=\"Alpha\""));

        let html = render(&props(&[("image-src", "a.png")]));
        assert!(html.contains("alt=\"\""));
    }

    #[test]
    fn test_image_sits_in_picture() {
        let html = render(&props(&[("title", "Alpha")]));
        let picture = html.find("<picture").unwrap();
        let img = html.find("<img").unwrap();
        let close = html.find("</picture>").unwrap();
        assert!(picture < img && img < close);
    }

    #[test]
    fn test_full_card() {
        let html = render(&props(&[
            ("title", "Alpha"),
            ("description", "Does things"),
            ("tech", "Rust"),
            ("link-href", "/alpha"),
            ("link-label", "Open"),
            ("image-src", "a.png"),
            ("image-alt", "Alpha shot"),
        ]));

        assert!(html.contains("<p class=\"project-card__description\">Does things</p>"));
        assert!(html.contains("<p class=\"project-card__tech\">Tech: Rust</p>"));
        assert!(html.contains(
            "href=\"/alpha\" target=\"_blank\" rel=\"noopener noreferrer\">Open</a>"
        ));
        assert!(html.contains("src=\"a.png\" alt=\"Alpha shot\""));
    }

    #[test]
    fn test_meta_line_skips_empty_parts() {
        assert_eq!(props(&[]).meta_line(), "");
        assert_eq!(props(&[("role", "Lead")]).meta_line(), "Lead");
        assert_eq!(
            props(&[("date", "2024"), ("keywords", "web")]).meta_line(),
            "2024 • web"
        );
        assert_eq!(
            props(&[("date", "2024"), ("role", "Lead"), ("keywords", "web")]).meta_line(),
            "2024 • Lead • web"
        );
    }

    #[test]
    fn test_render_escapes() {
        let html = render(&props(&[("title", "<b>\"x\" & y</b>")]));
        assert!(html.contains("&lt;b&gt;&quot;x&quot; &amp; y&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_render_includes_scoped_style() {
        let html = render(&CardProps::default());
        assert!(html.starts_with("<style>"));
        assert!(html.contains(".project-card{"));
    }

    #[test]
    fn test_unknown_attribute_ignored() {
        let mut p = CardProps::default();
        assert!(!p.set_attribute("onclick", "alert(1)"));
        assert_eq!(p, CardProps::default());
        assert!(p.get_attribute("onclick").is_none());
    }

    #[test]
    fn test_props_from_record() {
        let record = ProjectRecord {
            image_src: Some("a.png".to_string()),
            link_label: Some("Go".to_string()),
            ..ProjectRecord::new("x").with_title("A")
        };
        let p = CardProps::from(&record);
        assert_eq!(p.title, "A");
        assert_eq!(p.get_attribute("image-src"), Some("a.png"));
        assert_eq!(p.get_attribute("link-label"), Some("Go"));
        assert_eq!(p.get_attribute("tech"), Some(""));
    }

    #[test]
    fn test_card_renders_on_connect() {
        let mut card = ProjectCard::new();
        card.set_attribute("title", "A");
        assert_eq!(card.render_count(), 0);
        assert!(card.shadow_html().is_empty());

        card.connect();
        assert!(card.is_connected());
        assert_eq!(card.render_count(), 1);
        assert!(card.shadow_html().contains(">A</h2>"));

        card.connect();
        assert_eq!(card.render_count(), 1);
    }

    #[test]
    fn test_card_rerenders_on_observed_change() {
        let mut card = ProjectCard::new();
        card.connect();

        card.set_attribute("tech", "Go");
        assert_eq!(card.render_count(), 2);
        assert!(card.shadow_html().contains("Tech: Go"));

        card.set_attribute("data-project-id", "x");
        card.set_attribute("unknown", "v");
        assert_eq!(card.render_count(), 2);
        assert_eq!(card.get_attribute("data-project-id"), Some("x"));
    }

    #[test]
    fn test_card_to_html() {
        let mut card = ProjectCard::from_record(&ProjectRecord::new("x").with_title("A & B"));
        card.set_attribute("data-project-id", "x");
        card.connect();

        let html = card.to_html();
        assert!(html.starts_with("<project-card title=\"A &amp; B\" data-project-id=\"x\">"));
        assert!(html.contains("<template shadowrootmode=\"open\"><style>"));
        assert!(html.ends_with("</template></project-card>"));
    }

    #[test]
    fn test_container_replace_connects() {
        let mut container = CardContainer::new();
        assert!(container.is_empty());

        container.replace(vec![ProjectCard::new(), ProjectCard::new()]);
        assert_eq!(container.len(), 2);
        assert!(container.cards().iter().all(ProjectCard::is_connected));
        assert_eq!(container.to_html().lines().count(), 2);

        container.replace(Vec::new());
        assert!(container.is_empty());
        assert_eq!(container.to_html(), "");
    }
}
