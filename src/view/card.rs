use crate::api::User;
use crate::view::{Attrs, Node, Tag, build_element, text};

/// Shown in the city row when the record has no city.
pub const CITY_PLACEHOLDER: &str = "—";

/// Project one user record into a card fragment.
///
/// The city row is always present; company, phone and website rows are
/// omitted entirely when the value is missing or empty.
pub fn render_card(user: &User) -> Node {
    let title = build_element(Tag::Heading3, Attrs::default(), [text(user.name.as_str())]);
    let link = build_element(
        Tag::Anchor,
        Attrs {
            class: Some("email".to_string()),
            href: Some(format!("mailto:{}", user.email)),
            ..Attrs::default()
        },
        [text(user.email.as_str())],
    );

    let rows = [
        Some(row("Ciudad", user.city().unwrap_or(CITY_PLACEHOLDER))),
        user.company_name().map(|v| row("Empresa", v)),
        user.phone().map(|v| row("Teléfono", v)),
        user.website().map(|v| row("Sitio", v)),
    ];
    let meta = build_element(Tag::Div, Attrs::class("meta"), rows.into_iter().flatten());

    build_element(
        Tag::Article,
        Attrs {
            class: Some("card".to_string()),
            role: Some("listitem".to_string()),
            tabindex: Some(0),
            ..Attrs::default()
        },
        [title, link, meta],
    )
}

fn row(label: &str, value: &str) -> Node {
    let strong = build_element(Tag::Strong, Attrs::default(), [text(format!("{label}: "))]);
    build_element(Tag::Div, Attrs::default(), [strong, text(value)])
}

/// The metadata rows of a rendered card, as their text content.
pub fn meta_rows(card: &Node) -> Vec<String> {
    card.children()
        .iter()
        .find(|c| c.attrs().and_then(|a| a.class.as_deref()) == Some("meta"))
        .map(|meta| meta.children().iter().map(Node::text_content).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Address, Company};

    fn leanne() -> User {
        User {
            name: "Leanne Graham".into(),
            email: "Sincere@april.biz".into(),
            address: Some(Address {
                city: Some("Gwenborough".into()),
            }),
            ..User::default()
        }
    }

    #[test]
    fn name_and_email_only_yields_placeholder_city_row() {
        let user = User {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            ..User::default()
        };
        let card = render_card(&user);
        assert_eq!(meta_rows(&card), vec![format!("Ciudad: {CITY_PLACEHOLDER}")]);
    }

    #[test]
    fn card_structure_has_heading_link_and_meta() {
        let card = render_card(&leanne());
        assert_eq!(card.tag(), Some(Tag::Article));
        let attrs = card.attrs().unwrap();
        assert_eq!(attrs.role.as_deref(), Some("listitem"));
        assert_eq!(attrs.tabindex, Some(0));

        let children = card.children();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].tag(), Some(Tag::Heading3));
        assert_eq!(children[0].text_content(), "Leanne Graham");
        assert_eq!(
            children[1].attrs().and_then(|a| a.href.as_deref()),
            Some("mailto:Sincere@april.biz")
        );
        assert_eq!(meta_rows(&card), vec!["Ciudad: Gwenborough".to_string()]);
    }

    #[test]
    fn present_optional_fields_add_labeled_rows_in_order() {
        let user = User {
            phone: Some("555-1234".into()),
            website: Some("hildegard.org".into()),
            company: Some(Company {
                name: Some("Romaguera-Crona".into()),
            }),
            ..leanne()
        };
        assert_eq!(
            meta_rows(&render_card(&user)),
            vec![
                "Ciudad: Gwenborough".to_string(),
                "Empresa: Romaguera-Crona".to_string(),
                "Teléfono: 555-1234".to_string(),
                "Sitio: hildegard.org".to_string(),
            ]
        );
    }

    #[test]
    fn empty_company_name_omits_row() {
        let user = User {
            company: Some(Company {
                name: Some(String::new()),
            }),
            ..leanne()
        };
        assert_eq!(meta_rows(&render_card(&user)).len(), 1);
    }
}
