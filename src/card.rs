use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::i18n::Translator;
use crate::markup::Node;

/// Flat descriptive fields for one card. Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardProps {
    pub title: Option<String>,
    pub description: Option<String>,
    pub logo: Option<String>,
    pub image_src: Option<String>,
    pub date_created: Option<String>,
    pub date_updated: Option<String>,
    pub page_link: Option<String>,
    pub page_html: Option<String>,
    pub read_time: Option<String>,
    pub hex_code: Option<String>,
    pub theme: Option<String>,
    pub icon: Option<String>,
    pub url: Option<String>,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// `#rgb` through `#rrggbbaa`, or a bare color keyword.
fn css_color(v: &str) -> bool {
    match v.strip_prefix('#') {
        Some(hex) => (3..=8).contains(&hex.len()) && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => v.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-'),
    }
}

impl CardProps {
    /// Link target for the title: `url` wins over `page_link`.
    pub fn title_href(&self) -> Option<&str> {
        present(&self.url).or_else(|| present(&self.page_link))
    }

    /// Image shown on the card: `logo` wins over `image_src`.
    pub fn image(&self) -> Option<&str> {
        present(&self.logo).or_else(|| present(&self.image_src))
    }
}

/// Presentational card. Holds nothing beyond its props and the string lookup.
pub struct ContentCard {
    props: CardProps,
    i18n: Arc<dyn Translator>,
    extra_class: Option<&'static str>,
}

impl ContentCard {
    pub fn new(props: CardProps, i18n: Arc<dyn Translator>) -> Self {
        Self { props, i18n, extra_class: None }
    }

    /// Adds a modifier class to the card root (`site-card` for the site summary).
    pub fn with_class(mut self, class: &'static str) -> Self {
        self.extra_class = Some(class);
        self
    }

    fn info_line(&self, key: &str, value: &str) -> Node {
        Node::element("p")
            .child(Node::element("span").attr("class", "label").child_text(format!("{}:", self.i18n.translate(key))))
            .child_text(format!(" {value}"))
    }

    fn title_node(&self, title: &str) -> Node {
        let mut inner = Vec::new();
        if let Some(icon) = present(&self.props.icon) {
            inner.push(
                Node::element("span")
                    .attr("class", "icon")
                    .attr("data-icon", icon)
                    .attr("aria-hidden", "true"),
            );
        }
        inner.push(Node::text(title));

        let heading = match self.props.title_href() {
            Some(href) => Node::element("a")
                .attr("href", href)
                .attr("target", "_blank")
                .attr("rel", "noopener noreferrer")
                .children(inner),
            None => Node::element("span").children(inner),
        };
        Node::element("div").attr("class", "title").child(heading)
    }
}

impl Component for ContentCard {
    fn render(&self) -> Node {
        let p = &self.props;
        let class = match self.extra_class {
            Some(extra) => format!("content-card {extra}"),
            None => "content-card".to_string(),
        };
        let mut root = Node::element("article").attr("class", class);
        if let Some(hex) = present(&p.hex_code).filter(|h| css_color(h)) {
            root = root.attr("style", format!("--site-hex-code: {hex};"));
        }

        let title = present(&p.title);
        if let Some(t) = title {
            root = root.child(self.title_node(t));
        }
        if let Some(src) = p.image() {
            root = root.child(Node::element("img").attr("src", src).attr("alt", title.unwrap_or_default()));
        }

        let mut info = Node::element("div").attr("class", "info-row");
        if let Some(v) = present(&p.description) {
            info = info.child(self.info_line("description", v));
        }
        if let Some(v) = present(&p.date_created) {
            info = info.child(self.info_line("date-created", v));
        }
        if let Some(v) = present(&p.date_updated) {
            info = info.child(self.info_line("last-updated", v));
        }
        if let Some(v) = present(&p.read_time) {
            let text = format!("{v} {}", self.i18n.translate("minutes"));
            info = info.child(self.info_line("read-time", &text));
        }
        if let Some(v) = present(&p.theme) {
            info = info.child(self.info_line("theme", v));
        }
        if let Some(href) = present(&p.page_html) {
            info = info.child(
                Node::element("a")
                    .attr("class", "page-source")
                    .attr("href", href)
                    .attr("target", "_blank")
                    .attr("rel", "noopener noreferrer")
                    .child(Node::element("strong").child_text(self.i18n.translate("view-source"))),
            );
        }
        root.child(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Catalog;

    fn card(props: CardProps) -> Node {
        ContentCard::new(props, Arc::new(Catalog::english())).render()
    }

    #[test]
    fn empty_props_render_bare_card() {
        let n = card(CardProps::default());
        assert_eq!(n.to_html(), "<article class=\"content-card\"><div class=\"info-row\"></div></article>");
    }

    #[test]
    fn title_links_to_url_before_page_link() {
        let n = card(CardProps {
            title: Some("Home".into()),
            url: Some("https://a.test/".into()),
            page_link: Some("https://a.test/home".into()),
            ..Default::default()
        });
        let links = n.find_by_tag("a");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].get_attr("href"), Some("https://a.test/"));
        assert_eq!(links[0].get_attr("target"), Some("_blank"));

        let n = card(CardProps {
            title: Some("Home".into()),
            page_link: Some("https://a.test/home".into()),
            ..Default::default()
        });
        assert_eq!(n.find_by_tag("a")[0].get_attr("href"), Some("https://a.test/home"));
    }

    #[test]
    fn title_without_link_is_plain_text() {
        let n = card(CardProps { title: Some("Loose".into()), ..Default::default() });
        assert!(n.find_by_tag("a").is_empty());
        assert_eq!(n.find_by_class("title")[0].text_content(), "Loose");
    }

    #[test]
    fn logo_preferred_over_image_src() {
        let n = card(CardProps {
            title: Some("T".into()),
            logo: Some("logo.png".into()),
            image_src: Some("img.png".into()),
            ..Default::default()
        });
        let imgs = n.find_by_tag("img");
        assert_eq!(imgs.len(), 1);
        assert_eq!(imgs[0].get_attr("src"), Some("logo.png"));
        assert_eq!(imgs[0].get_attr("alt"), Some("T"));
    }

    #[test]
    fn optional_rows_render_only_when_present() {
        let n = card(CardProps {
            description: Some("About".into()),
            read_time: Some("4".into()),
            date_updated: Some("".into()),
            page_html: Some("https://a.test/x.html".into()),
            icon: Some("star".into()),
            hex_code: Some("#336699".into()),
            ..Default::default()
        });
        let text = n.text_content();
        assert!(text.contains("Description: About"));
        assert!(text.contains("Read Time: 4 minutes"));
        assert!(!text.contains("Last Updated"));
        assert!(text.contains("View page source"));
        assert_eq!(n.count_by_class("page-source"), 1);
        // no title, so no icon either
        assert_eq!(n.count_by_class("icon"), 0);
        assert_eq!(n.get_attr("style"), Some("--site-hex-code: #336699;"));
    }

    #[test]
    fn icon_sits_inside_title_link() {
        let n = card(CardProps {
            title: Some("T".into()),
            icon: Some("hax:site".into()),
            page_link: Some("https://a.test/t".into()),
            ..Default::default()
        });
        let link = n.find_by_tag("a")[0];
        assert_eq!(link.count_by_class("icon"), 1);
        assert_eq!(link.find_by_class("icon")[0].get_attr("data-icon"), Some("hax:site"));
    }

    #[test]
    fn hex_code_must_be_a_plain_color() {
        for ok in ["#abc", "#001E44", "#00112233", "rebeccapurple"] {
            let n = card(CardProps { hex_code: Some(ok.into()), ..Default::default() });
            assert_eq!(n.get_attr("style"), Some(format!("--site-hex-code: {ok};").as_str()));
        }
        for bad in ["red; background: url(x)", "#12", "#123456789", "#ggg", "var(--x)"] {
            let n = card(CardProps { hex_code: Some(bad.into()), ..Default::default() });
            assert_eq!(n.get_attr("style"), None, "{bad}");
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let props = CardProps { title: Some("Same".into()), theme: Some("clean-one".into()), ..Default::default() };
        assert_eq!(card(props.clone()).to_html(), card(props).to_html());
    }
}
