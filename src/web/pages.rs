//! HTML page synthesis
//!
//! Menu, argument form, and error pages are built as plain strings; the
//! markup is small enough that a template engine would outweigh it. All
//! interface text passes through the resolved locale, all interpolated
//! values through [`escape_html`].

use crate::args::{ArgSpec, ArgType, ArgValue, QueryValues};
use crate::generator::{GeneratorEntry, Registry};
use crate::i18n::{self, Locale};

/// Escape text for HTML body and attribute positions
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Common page shell: head, stylesheet, script, `lang` attribute
fn page(locale: &Locale, title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/boxforge.css\">\n\
         </head>\n\
         <body>\n\
         {body}\
         <script src=\"/static/boxforge.js\"></script>\n\
         </body>\n\
         </html>\n",
        lang = escape_html(locale.tag()),
        title = escape_html(title),
        body = body,
    )
}

/// The generator menu: every visible generator, grouped, with thumbnail,
/// translated summary, and a client-side filter hook.
pub fn menu_page(registry: &Registry, locale: &Locale) -> String {
    let mut body = String::with_capacity(4096);

    body.push_str("<header>\n<h1><a href=\"/\">boxforge</a></h1>\n");
    body.push_str("<nav class=\"languages\">");
    for tag in i18n::available() {
        let class = if tag == locale.tag() { " class=\"current\"" } else { "" };
        body.push_str(&format!(
            "<a href=\"/?language={tag}\" hreflang=\"{tag}\"{class}>{tag}</a> ",
            tag = escape_html(&tag),
            class = class,
        ));
    }
    body.push_str("</nav>\n");
    body.push_str(&format!(
        "<input type=\"search\" id=\"filter\" placeholder=\"{}\" autofocus>\n",
        escape_html(locale.tr("Filter generators"))
    ));
    body.push_str("</header>\n<main>\n");

    for (group, entries) in registry.by_group() {
        body.push_str(&format!(
            "<h2>{}</h2>\n<ul class=\"generators\">\n",
            escape_html(locale.tr(group.title()))
        ));
        for entry in entries {
            body.push_str(&menu_entry(entry, locale));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("</main>\n");
    page(locale, "boxforge", &body)
}

fn menu_entry(entry: &GeneratorEntry, locale: &Locale) -> String {
    let name = escape_html(entry.name());
    let summary = escape_html(locale.tr(entry.summary()));
    let search = escape_html(&format!(
        "{} {}",
        entry.name().to_lowercase(),
        locale.tr(entry.summary()).to_lowercase()
    ));
    format!(
        "<li class=\"generator\" data-search=\"{search}\">\n\
         <a href=\"/{name}\">\n\
         <img src=\"/static/samples/{name}-thumb.jpg\" alt=\"\" loading=\"lazy\">\n\
         <span class=\"name\">{name}</span>\n\
         <span class=\"summary\">{summary}</span>\n\
         </a>\n\
         </li>\n"
    )
}

/// The argument form for one generator. Submits via GET back to the same
/// path; the two submit buttons set `render` to download or show inline.
pub fn form_page(entry: &GeneratorEntry, query: &QueryValues, locale: &Locale) -> String {
    let gen = entry.instantiate();
    let name = escape_html(entry.name());
    let mut body = String::with_capacity(4096);

    body.push_str(&format!(
        "<p class=\"back\"><a href=\"/\">{}</a></p>\n",
        escape_html(locale.tr("Back to the menu"))
    ));
    body.push_str(&format!("<h1>{name}</h1>\n"));
    body.push_str(&format!(
        "<p class=\"summary\">{}</p>\n",
        escape_html(locale.tr(entry.summary()))
    ));
    if let Some(description) = entry.description() {
        body.push_str(&format!(
            "<p class=\"description\">{}</p>\n",
            escape_html(locale.tr(description))
        ));
    }

    body.push_str(&format!("<form action=\"/{name}\" method=\"get\">\n"));
    if query.get("language").is_some() {
        body.push_str(&format!(
            "<input type=\"hidden\" name=\"language\" value=\"{}\">\n",
            escape_html(locale.tag())
        ));
    }
    for group in gen.arg_groups() {
        body.push_str(&format!(
            "<fieldset>\n<legend>{}</legend>\n",
            escape_html(locale.tr(&group.title))
        ));
        for spec in &group.args {
            body.push_str(&field_row(spec, query, locale));
        }
        body.push_str("</fieldset>\n");
    }
    body.push_str(&format!(
        "<p class=\"actions\">\n\
         <button type=\"submit\" name=\"render\" value=\"1\">{generate}</button>\n\
         <button type=\"submit\" name=\"render\" value=\"2\">{inline}</button>\n\
         </p>\n</form>\n",
        generate = escape_html(locale.tr("Generate")),
        inline = escape_html(locale.tr("Open in browser")),
    ));

    page(locale, entry.name(), &body)
}

fn field_row(spec: &ArgSpec, query: &QueryValues, locale: &Locale) -> String {
    let name = escape_html(&spec.name);
    let help = escape_html(locale.tr(&spec.help));
    format!(
        "<p class=\"field\"><label for=\"{name}\" title=\"{help}\">{name}</label>{widget}</p>\n",
        widget = widget(spec, query)
    )
}

/// One input widget, prefilled from the submitted query or the declared
/// default. Raw query values are echoed back as-is so a rejected form can
/// be corrected instead of retyped.
fn widget(spec: &ArgSpec, query: &QueryValues) -> String {
    let name = escape_html(&spec.name);
    let current = || {
        escape_html(
            query
                .get(&spec.name)
                .map(str::to_string)
                .unwrap_or_else(|| spec.default.to_form_value())
                .as_str(),
        )
    };

    match &spec.arg_type {
        ArgType::Float => format!(
            "<input type=\"number\" step=\"any\" id=\"{name}\" name=\"{name}\" value=\"{}\">",
            current()
        ),
        ArgType::Int => format!(
            "<input type=\"number\" step=\"1\" id=\"{name}\" name=\"{name}\" value=\"{}\">",
            current()
        ),
        ArgType::Str => format!(
            "<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\">",
            current()
        ),
        ArgType::Sections => format!(
            "<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\" placeholder=\"50*3:60\">",
            current()
        ),
        ArgType::Bool => {
            let checked = match query.get(&spec.name) {
                Some(raw) => matches!(spec.parse(raw), Ok(ArgValue::Bool(true))),
                None => spec.default == ArgValue::Bool(true),
            };
            format!(
                "<input type=\"checkbox\" id=\"{name}\" name=\"{name}\"{}>",
                if checked { " checked" } else { "" }
            )
        }
        ArgType::Choice(choices) => {
            let current = current();
            let mut out = format!("<select id=\"{name}\" name=\"{name}\">");
            for choice in choices {
                let choice = escape_html(choice);
                let selected = if choice == current { " selected" } else { "" };
                out.push_str(&format!(
                    "<option value=\"{choice}\"{selected}>{choice}</option>"
                ));
            }
            out.push_str("</select>");
            out
        }
    }
}

/// Minimal localized error page
pub fn error_page(locale: &Locale, title: &str, message: &str) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", escape_html(locale.tr(title))));
    body.push_str(&format!(
        "<p class=\"error\">{}</p>\n",
        escape_html(message)
    ));
    body.push_str(&format!(
        "<p class=\"back\"><a href=\"/\">{}</a></p>\n",
        escape_html(locale.tr("Back to the menu"))
    ));
    page(locale, locale.tr(title), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators;

    fn queries(pairs: &[(&str, &str)]) -> QueryValues {
        QueryValues::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_menu_lists_visible_generators() {
        let registry = generators::registry();
        let html = menu_page(&registry, &Locale::default());
        assert!(html.contains("href=\"/ClosedBox\""));
        assert!(html.contains("href=\"/DividerTray\""));
        assert!(html.contains("/static/samples/OpenBox-thumb.jpg"));
        assert!(!html.contains("BurnTest"), "hidden generators stay off the menu");
    }

    #[test]
    fn test_menu_is_localized() {
        let registry = generators::registry();
        let locale = crate::i18n::lookup("de").unwrap();
        let html = menu_page(&registry, &locale);
        assert!(html.contains("<html lang=\"de\">"));
        assert!(html.contains("Kisten"));
        assert!(html.contains("Generatoren filtern"));
    }

    #[test]
    fn test_menu_language_links() {
        let registry = generators::registry();
        let html = menu_page(&registry, &Locale::default());
        assert!(html.contains("href=\"/?language=de\""));
        assert!(html.contains("href=\"/?language=fr\""));
    }

    #[test]
    fn test_form_contains_declared_parameters() {
        let registry = generators::registry();
        let entry = registry.get("ClosedBox").unwrap();
        let html = form_page(entry, &queries(&[]), &Locale::default());
        for name in ["x", "y", "h", "thickness", "burn", "labels", "format", "outside"] {
            assert!(html.contains(&format!("name=\"{name}\"")), "missing {name}");
        }
        assert!(html.contains("<option value=\"svg\" selected>"));
        assert!(html.contains("<option value=\"dxf\">"));
        // checkbox defaults: labels on, outside off
        assert!(html.contains("id=\"labels\" name=\"labels\" checked"));
        assert!(html.contains("id=\"outside\" name=\"outside\">"));
    }

    #[test]
    fn test_form_render_buttons() {
        let registry = generators::registry();
        let entry = registry.get("OpenBox").unwrap();
        let html = form_page(entry, &queries(&[]), &Locale::default());
        assert!(html.contains("name=\"render\" value=\"1\""));
        assert!(html.contains("name=\"render\" value=\"2\""));
        assert!(html.contains("action=\"/OpenBox\" method=\"get\""));
    }

    #[test]
    fn test_form_prefills_submitted_values() {
        let registry = generators::registry();
        let entry = registry.get("ClosedBox").unwrap();
        let html = form_page(entry, &queries(&[("x", "123.5"), ("labels", "0")]), &Locale::default());
        assert!(html.contains("name=\"x\" value=\"123.5\""));
        assert!(html.contains("id=\"labels\" name=\"labels\">"), "labels=0 unchecks the box");
    }

    #[test]
    fn test_form_defaults_prefilled() {
        let registry = generators::registry();
        let entry = registry.get("DividerTray").unwrap();
        let html = form_page(entry, &queries(&[]), &Locale::default());
        assert!(html.contains("name=\"sx\" value=\"50:50:50\""));
    }

    #[test]
    fn test_form_keeps_explicit_language() {
        let registry = generators::registry();
        let entry = registry.get("OpenBox").unwrap();
        let locale = crate::i18n::lookup("fr").unwrap();
        let html = form_page(entry, &queries(&[("language", "fr")]), &locale);
        assert!(html.contains("name=\"language\" value=\"fr\""));
        assert!(html.contains("Générer"));

        let html = form_page(entry, &queries(&[]), &Locale::default());
        assert!(!html.contains("name=\"language\""));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = error_page(&Locale::default(), "Invalid parameter", "bad <script> value");
        assert!(html.contains("Invalid parameter"));
        assert!(html.contains("bad &lt;script&gt; value"));
        assert!(!html.contains("<script> value"));
    }

    #[test]
    fn test_error_page_localized_title() {
        let locale = crate::i18n::lookup("de").unwrap();
        let html = error_page(&locale, "Invalid parameter", "x");
        assert!(html.contains("Ungültiger Parameter"));
    }
}
