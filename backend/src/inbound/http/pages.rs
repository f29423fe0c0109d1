//! Server-rendered HTML for the draw form, results, and reveal pages.
//!
//! Every interpolated value passes through [`escape_html`].

use actix_web::http::{StatusCode, header};
use actix_web::HttpResponse;
use pairing::Participant;
use url::Url;

use crate::domain::RevealPayload;

/// Values shown in the draw form's fields.
pub struct FormValues<'a> {
    /// One name per line.
    pub names: &'a str,
    /// Receivers per giver.
    pub giftee_count: &'a str,
    /// `Giver, Receiver` per line.
    pub exclusions: &'a str,
}

impl Default for FormValues<'_> {
    fn default() -> Self {
        Self {
            names: "",
            giftee_count: "1",
            exclusions: "",
        }
    }
}

/// Escape text for element content and double-quoted attributes.
///
/// # Examples
/// ```
/// use backend::inbound::http::pages::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Wrap a rendered page with the HTML content type.
///
/// Pages carry assignments or secrets in their URLs, so caching is disabled.
#[must_use]
pub fn html_response(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(header::ContentType::html())
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .insert_header((header::REFERRER_POLICY, "no-referrer"))
        .body(body)
}

fn layout(title: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n</head>\n<body>\n<main>\n{content}</main>\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

/// Render the draw form, optionally above an error message.
#[must_use]
pub fn index_page(values: &FormValues<'_>, error: Option<&str>) -> String {
    let mut content = String::from("<h1>Gift exchange draw</h1>\n");
    if let Some(message) = error {
        content.push_str(&format!(
            "<p class=\"error\" role=\"alert\">{}</p>\n",
            escape_html(message)
        ));
    }
    content.push_str(&format!(
        "<form method=\"post\" action=\"/\">\n\
         <label for=\"names\">Participants (one per line)</label>\n\
         <textarea id=\"names\" name=\"names\" rows=\"8\" required>{names}</textarea>\n\
         <label for=\"n_giftees\">Gifts per person</label>\n\
         <input id=\"n_giftees\" name=\"n_giftees\" type=\"number\" min=\"1\" value=\"{count}\">\n\
         <label for=\"exclusions\">Exclusions (one <code>Giver, Receiver</code> per line)</label>\n\
         <textarea id=\"exclusions\" name=\"exclusions\" rows=\"4\">{exclusions}</textarea>\n\
         <p class=\"hint\">Exclusions only apply in one direction. \
         To keep a couple apart, add both <code>A, B</code> and <code>B, A</code>.</p>\n\
         <button type=\"submit\">Draw</button>\n</form>\n",
        names = escape_html(values.names),
        count = escape_html(values.giftee_count),
        exclusions = escape_html(values.exclusions),
    ));
    layout("Gift exchange draw", &content)
}

/// Render one private link per giver.
#[must_use]
pub fn results_page(links: &[(Participant, Url)]) -> String {
    let mut content = String::from(
        "<h1>Draw complete</h1>\n\
         <p>Send each person their own link. Opening a link shows only that person's receivers.</p>\n\
         <ul class=\"links\">\n",
    );
    for (giver, link) in links {
        content.push_str(&format!(
            "<li><strong>{giver}</strong>: <a href=\"{href}\">{href}</a></li>\n",
            giver = escape_html(giver.as_str()),
            href = escape_html(link.as_str()),
        ));
    }
    content.push_str("</ul>\n<p><a href=\"/\">Start a new draw</a></p>\n");
    layout("Draw complete", &content)
}

/// Render a giver's receivers.
#[must_use]
pub fn reveal_page(payload: &RevealPayload) -> String {
    let mut content = format!(
        "<h1>Hello, {}!</h1>\n<p>You are buying a gift for:</p>\n<ul class=\"receivers\">\n",
        escape_html(payload.giver().as_str())
    );
    for receiver in payload.receivers() {
        content.push_str(&format!("<li>{}</li>\n", escape_html(receiver.as_str())));
    }
    content.push_str("</ul>\n");
    layout("Your gift exchange draw", &content)
}

/// Render a reveal failure.
#[must_use]
pub fn reveal_error_page(message: &str) -> String {
    let content = format!(
        "<h1>Link not recognised</h1>\n<p class=\"error\" role=\"alert\">{}</p>\n",
        escape_html(message)
    );
    layout("Link not recognised", &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn participant(name: &str) -> Participant {
        Participant::new(name).expect("valid participant")
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("a&b", "a&amp;b")]
    #[case("<script>", "&lt;script&gt;")]
    #[case("\"'", "&quot;&#x27;")]
    fn escapes_markup(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_html(raw), expected);
    }

    #[rstest]
    fn index_page_preserves_escaped_values_and_error() {
        let values = FormValues {
            names: "Ada\n<Brian>",
            giftee_count: "2",
            exclusions: "Ada, <Brian>",
        };

        let html = index_page(&values, Some("Need <more> people"));

        assert!(html.contains("Ada\n&lt;Brian&gt;</textarea>"));
        assert!(html.contains("value=\"2\""));
        assert!(html.contains("Ada, &lt;Brian&gt;</textarea>"));
        assert!(html.contains("Need &lt;more&gt; people"));
        assert!(!html.contains("<Brian>"));
    }

    #[rstest]
    fn index_page_explains_directional_exclusions() {
        let html = index_page(&FormValues::default(), None);

        assert!(html.contains("one direction"));
        assert!(!html.contains("role=\"alert\""));
    }

    #[rstest]
    fn results_page_lists_each_giver_link() {
        let link = Url::parse("http://localhost/reveal/abc").expect("valid URL");
        let html = results_page(&[
            (participant("Ada"), link.clone()),
            (participant("Brian & Co"), link),
        ]);

        assert!(html.contains("<strong>Ada</strong>"));
        assert!(html.contains("<strong>Brian &amp; Co</strong>"));
        assert_eq!(html.matches("href=\"http://localhost/reveal/abc\"").count(), 2);
    }

    #[rstest]
    fn reveal_page_shows_giver_and_receivers() {
        let payload = RevealPayload::new(
            participant("Ada"),
            vec![participant("Brian"), participant("<Chloe>")],
        );

        let html = reveal_page(&payload);

        assert!(html.contains("Hello, Ada!"));
        assert!(html.contains("<li>Brian</li>"));
        assert!(html.contains("<li>&lt;Chloe&gt;</li>"));
    }

    #[rstest]
    fn html_response_disables_caching() {
        let response = html_response(StatusCode::OK, reveal_error_page("gone"));

        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/html; charset=utf-8")
        );
    }
}
