// Unit tests for user-cards
// These tests work with the public API only.

#[cfg(test)]
mod search_tests {
    use user_cards::api::User;
    use user_cards::search::{filter_users, normalize_query};

    fn create_test_user(name: &str, email: &str) -> User {
        User {
            name: name.to_string(),
            email: email.to_string(),
            ..User::default()
        }
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  GrAhAm \t"), "graham");
        assert_eq!(normalize_query(""), "");
    }

    #[test]
    fn test_every_result_matches_and_no_match_is_left_out() {
        let users = vec![
            create_test_user("Leanne Graham", "Sincere@april.biz"),
            create_test_user("Ervin Howell", "Shanna@melissa.tv"),
            create_test_user("Patricia Lebsack", "Julianne.OConner@kory.org"),
        ];
        let q = "ann";
        let result = filter_users(&users, q);
        for u in &result {
            assert!(u.name.to_lowercase().contains(q) || u.email.to_lowercase().contains(q));
        }
        let left_out: Vec<_> = users.iter().filter(|u| !result.contains(u)).collect();
        for u in left_out {
            assert!(!u.name.to_lowercase().contains(q) && !u.email.to_lowercase().contains(q));
        }
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_empty_query_keeps_order_and_length() {
        let users = vec![
            create_test_user("b", "b@x"),
            create_test_user("a", "a@x"),
        ];
        assert_eq!(filter_users(&users, ""), users);
    }
}

#[cfg(test)]
mod view_tests {
    use user_cards::api::{Address, User};
    use user_cards::view::card::{CITY_PLACEHOLDER, meta_rows};
    use user_cards::view::{Attrs, Tag, build_element, render_card, text};

    #[test]
    fn test_card_with_only_name_and_email() {
        let user = User {
            name: "Solo".into(),
            email: "solo@example.com".into(),
            ..User::default()
        };
        let card = render_card(&user);
        let rows = meta_rows(&card);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], format!("Ciudad: {CITY_PLACEHOLDER}"));
        let html = card.to_html();
        assert!(!html.contains("Empresa"));
        assert!(!html.contains("Teléfono"));
        assert!(!html.contains("Sitio"));
    }

    #[test]
    fn test_card_html_shape() {
        let user = User {
            name: "Leanne Graham".into(),
            email: "Sincere@april.biz".into(),
            address: Some(Address {
                city: Some("Gwenborough".into()),
            }),
            ..User::default()
        };
        assert_eq!(
            render_card(&user).to_html(),
            "<article class=\"card\" role=\"listitem\" tabindex=\"0\">\
<h3>Leanne Graham</h3>\
<a class=\"email\" href=\"mailto:Sincere@april.biz\">Sincere@april.biz</a>\
<div class=\"meta\"><div><strong>Ciudad: </strong>Gwenborough</div></div>\
</article>"
        );
    }

    #[test]
    fn test_build_element_drops_unsupported_attributes() {
        let node = build_element(
            Tag::Strong,
            Attrs {
                role: Some("listitem".into()),
                tabindex: Some(0),
                ..Attrs::default()
            },
            [text("x")],
        );
        assert_eq!(node.attrs(), Some(&Attrs::default()));
        assert_eq!(node.to_html(), "<strong>x</strong>");
    }
}

#[cfg(test)]
mod ui_tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use user_cards::api::{Address, User};
    use user_cards::app::{AppState, STATUS_LOAD_FAILED};
    use user_cards::error::FetchError;
    use user_cards::ui;

    fn screen(app: &mut AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).expect("terminal");
        terminal.draw(|f| ui::render(f, app)).expect("draw");
        let buf = terminal.backend().buffer();
        buf.content
            .chunks(buf.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_loaded_screen_shows_cards_and_status() {
        let mut app = AppState::default();
        app.begin_load();
        app.finish_load(Ok(vec![User {
            name: "Leanne Graham".into(),
            email: "Sincere@april.biz".into(),
            address: Some(Address {
                city: Some("Gwenborough".into()),
            }),
            ..User::default()
        }]));
        let out = screen(&mut app);
        assert!(out.contains("Leanne Graham"));
        assert!(out.contains("Sincere@april.biz"));
        assert!(out.contains("Ciudad: Gwenborough"));
        assert!(out.contains("Mostrando 1 usuarios."));
        assert!(app.columns >= 1);
    }

    #[test]
    fn test_failed_screen_shows_generic_message() {
        let mut app = AppState::default();
        app.begin_load();
        app.finish_load(Err(FetchError::Http { status: 500 }));
        let out = screen(&mut app);
        assert!(out.contains(STATUS_LOAD_FAILED));
        assert!(!out.contains("Ciudad"));
    }

    #[test]
    fn test_loading_screen_shows_loading_message() {
        let mut app = AppState::default();
        app.begin_load();
        let out = screen(&mut app);
        assert!(out.contains("Cargando usuarios"));
    }
}
