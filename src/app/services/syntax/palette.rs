use std::str::FromStr;

use syntect::highlighting::{
    Color, FontStyle, ScopeSelectors, StyleModifier, Theme, ThemeItem, ThemeSettings,
};

use crate::app::domain::theme::CodeTheme;

/// Colors of one theme, grouped by token category.
pub(super) struct Palette {
    pub background: u32,
    pub foreground: u32,
    pub comment: u32,
    pub keyword: u32,
    pub string: u32,
    pub number: u32,
    pub function: u32,
    pub class: u32,
    pub tag: u32,
    pub attribute: u32,
    pub operator: u32,
    pub punctuation: u32,
    pub variable: u32,
    pub italic_comments: bool,
}

pub(super) fn palette(theme: CodeTheme) -> Palette {
    match theme {
        CodeTheme::Dark => Palette {
            background: 0x1e1e1e,
            foreground: 0xd4d4d4,
            comment: 0x6a9955,
            keyword: 0x569cd6,
            string: 0xce9178,
            number: 0xb5cea8,
            function: 0xdcdcaa,
            class: 0x4ec9b0,
            tag: 0x569cd6,
            attribute: 0x9cdcfe,
            operator: 0xd4d4d4,
            punctuation: 0xd4d4d4,
            variable: 0x9cdcfe,
            italic_comments: false,
        },
        CodeTheme::Light => Palette {
            background: 0xfdf6e3,
            foreground: 0x657b83,
            comment: 0x93a1a1,
            keyword: 0x859900,
            string: 0x2aa198,
            number: 0xd33682,
            function: 0xb58900,
            class: 0x268bd2,
            tag: 0x268bd2,
            attribute: 0x2aa198,
            operator: 0x657b83,
            punctuation: 0x586e75,
            variable: 0xcb4b16,
            italic_comments: false,
        },
        CodeTheme::Atom => Palette {
            background: 0x1d1f21,
            foreground: 0xc5c8c6,
            comment: 0x7c7c7c,
            keyword: 0x96cbfe,
            string: 0xa8ff60,
            number: 0xff73fd,
            function: 0xdad085,
            class: 0xffffb6,
            tag: 0x96cbfe,
            attribute: 0xffffb6,
            operator: 0xededed,
            punctuation: 0xc5c8c6,
            variable: 0xc6c5fe,
            italic_comments: false,
        },
        CodeTheme::Darcula => Palette {
            background: 0x2b2b2b,
            foreground: 0xa9b7c6,
            comment: 0x808080,
            keyword: 0xcc7832,
            string: 0x6a8759,
            number: 0x6897bb,
            function: 0xffc66d,
            class: 0xa9b7c6,
            tag: 0xe8bf6a,
            attribute: 0xbababa,
            operator: 0xa9b7c6,
            punctuation: 0xcc7832,
            variable: 0x9876aa,
            italic_comments: true,
        },
        CodeTheme::Coy => Palette {
            background: 0xfdfdfd,
            foreground: 0x000000,
            comment: 0x7d8b99,
            keyword: 0x1990b8,
            string: 0x2f9c0a,
            number: 0xc92c2c,
            function: 0x2f9c0a,
            class: 0x1990b8,
            tag: 0xc92c2c,
            attribute: 0xc92c2c,
            operator: 0xa67f59,
            punctuation: 0x5f6364,
            variable: 0xa67f59,
            italic_comments: false,
        },
        CodeTheme::Dracula => Palette {
            background: 0x282a36,
            foreground: 0xf8f8f2,
            comment: 0x6272a4,
            keyword: 0xff79c6,
            string: 0xf1fa8c,
            number: 0xbd93f9,
            function: 0x50fa7b,
            class: 0x8be9fd,
            tag: 0xff79c6,
            attribute: 0x50fa7b,
            operator: 0xff79c6,
            punctuation: 0xf8f8f2,
            variable: 0xf8f8f2,
            italic_comments: false,
        },
        CodeTheme::NightOwl => Palette {
            background: 0x011627,
            foreground: 0xd6deeb,
            comment: 0x637777,
            keyword: 0xc792ea,
            string: 0xecc48d,
            number: 0xf78c6c,
            function: 0x82aaff,
            class: 0xffcb8b,
            tag: 0x7fdbca,
            attribute: 0xaddb67,
            operator: 0x7fdbca,
            punctuation: 0xc792ea,
            variable: 0xd6deeb,
            italic_comments: true,
        },
        CodeTheme::Okaidia => Palette {
            background: 0x272822,
            foreground: 0xf8f8f2,
            comment: 0x8292a2,
            keyword: 0x66d9ef,
            string: 0xa6e22e,
            number: 0xae81ff,
            function: 0xe6db74,
            class: 0xe6db74,
            tag: 0xf92672,
            attribute: 0xa6e22e,
            operator: 0xf8f8f2,
            punctuation: 0xf8f8f2,
            variable: 0xf8f8f2,
            italic_comments: false,
        },
    }
}

pub(super) fn rgb(hex: u32) -> Color {
    Color {
        r: ((hex >> 16) & 0xff) as u8,
        g: ((hex >> 8) & 0xff) as u8,
        b: (hex & 0xff) as u8,
        a: 0xff,
    }
}

fn rule(selector: &str, color: u32, font_style: Option<FontStyle>) -> Option<ThemeItem> {
    let scope = match ScopeSelectors::from_str(selector) {
        Ok(scope) => scope,
        Err(e) => {
            log::warn!("Skipping theme rule '{}': {:?}", selector, e);
            return None;
        }
    };
    Some(ThemeItem {
        scope,
        style: StyleModifier {
            foreground: Some(rgb(color)),
            background: None,
            font_style,
        },
    })
}

/// Build the syntect theme for one of the fixed visual themes.
pub(super) fn build_theme(theme: CodeTheme) -> Theme {
    let p = palette(theme);
    let comment_style = p.italic_comments.then_some(FontStyle::ITALIC);

    let scopes = [
        rule("comment, comment punctuation", p.comment, comment_style),
        rule("keyword, storage, keyword.control, constant.language", p.keyword, None),
        rule("keyword.operator", p.operator, None),
        rule("string, string punctuation.definition.string", p.string, None),
        rule("constant.numeric, constant.character", p.number, None),
        rule("entity.name.function, support.function, meta.function-call", p.function, None),
        rule("entity.name.class, entity.name.type, support.class, support.type", p.class, None),
        rule("entity.name.tag, meta.tag entity.name", p.tag, None),
        rule("entity.other.attribute-name", p.attribute, None),
        rule("punctuation, meta.brace", p.punctuation, None),
        rule("variable, variable.parameter, meta.property-name", p.variable, None),
    ]
    .into_iter()
    .flatten()
    .collect();

    Theme {
        name: Some(theme.key().to_string()),
        settings: ThemeSettings {
            foreground: Some(rgb(p.foreground)),
            background: Some(rgb(p.background)),
            ..Default::default()
        },
        scopes,
        ..Default::default()
    }
}
