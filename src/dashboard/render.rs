//! HTML view for an assembled page
//!
//! Fragment bodies are written verbatim. Everything derived from the request
//! (title, location) is escaped.

use super::assembler::{PageModel, PageSlot, SlotContent};
use super::error::FragmentError;
use super::freshness::Freshness;
use super::location::FragmentSlot;

const STYLESHEET: &str = "mystyle.css";

/// Columns of the per-state summary table rows
const TABLE_HEADINGS: [&str; 6] = ["State", "Region", "County", "New Cases", "Trend", "Yellow Target"];

/// Render `page` as a complete HTML document
pub fn render_page(page: &PageModel, unavailable_text: &str) -> Vec<u8> {
    let title = escape_html(&page.title);
    let mut out = Vec::with_capacity(
        1024 + page
            .slots
            .iter()
            .map(|s| match &s.content {
                SlotContent::Loaded(bytes) => bytes.len(),
                SlotContent::Unavailable(_) => 0,
            })
            .sum::<usize>(),
    );

    push(&mut out, "<!DOCTYPE html>\n<html>\n<head>\n");
    push(&mut out, "    <meta charset=\"utf-8\">\n");
    push(&mut out, &format!("    <title>{title}</title>\n"));
    push(
        &mut out,
        &format!("    <link rel=\"stylesheet\" type=\"text/css\" href=\"{STYLESHEET}\">\n"),
    );
    push(
        &mut out,
        &format!(
            "</head>\n<body data-location=\"{}\">\n",
            escape_html(page.location.as_str())
        ),
    );
    push(&mut out, &format!("    <h1>{title}</h1>\n"));

    let updated = match &page.freshness {
        Freshness::Known { at, display } => format!(
            "<time datetime=\"{}\">{}</time>",
            at.to_rfc3339(),
            escape_html(display)
        ),
        Freshness::Unknown => "<span class=\"unknown\">unknown</span>".to_string(),
    };
    push(&mut out, &format!("    <h3>Data Last Updated: {updated}</h3>\n"));

    let (rows, charts): (Vec<&PageSlot>, Vec<&PageSlot>) = page
        .slots
        .iter()
        .partition(|s| s.slot == FragmentSlot::Table);

    if !charts.is_empty() {
        push(&mut out, "    <table class=\"serif\">\n      <tbody>\n");
        for row in charts.chunks(page.columns.max(1)) {
            push(&mut out, "        <tr>\n");
            for slot in row {
                push(
                    &mut out,
                    &format!(
                        "          <td class=\"slot-{}\" data-fragment=\"{}\">",
                        slot.slot.as_str(),
                        escape_html(&slot.fragment)
                    ),
                );
                match &slot.content {
                    SlotContent::Loaded(bytes) => out.extend_from_slice(bytes),
                    SlotContent::Unavailable(err) => {
                        push(&mut out, &unavailable(slot, err, unavailable_text, "p"));
                    }
                }
                push(&mut out, "</td>\n");
            }
            push(&mut out, "        </tr>\n");
        }
        push(&mut out, "      </tbody>\n    </table>\n");
    }

    // Table fragments are bare <tr> rows and go straight into <tbody>
    for slot in rows {
        push(&mut out, "    <table class=\"serif\">\n      <thead>\n        <tr>\n");
        for heading in TABLE_HEADINGS {
            push(&mut out, &format!("          <th>{heading}</th>\n"));
        }
        push(&mut out, "        </tr>\n      </thead>\n");
        push(
            &mut out,
            &format!(
                "      <tbody class=\"slot-{}\" data-fragment=\"{}\">\n",
                slot.slot.as_str(),
                escape_html(&slot.fragment)
            ),
        );
        match &slot.content {
            SlotContent::Loaded(bytes) => out.extend_from_slice(bytes),
            SlotContent::Unavailable(err) => push(
                &mut out,
                &format!(
                    "        <tr><td colspan=\"{}\">{}</td></tr>\n",
                    TABLE_HEADINGS.len(),
                    unavailable(slot, err, unavailable_text, "span")
                ),
            ),
        }
        push(&mut out, "      </tbody>\n    </table>\n");
    }

    if !page.footer.is_empty() {
        push(&mut out, &format!("    <h4><p>{}</p></h4>\n", page.footer));
    }
    push(&mut out, "</body>\n</html>\n");
    out
}

fn unavailable(slot: &PageSlot, err: &FragmentError, text: &str, tag: &str) -> String {
    format!(
        "<{tag} class=\"unavailable\" title=\"{}\">{}: {}</{tag}>",
        escape_html(&err.to_string()),
        slot.slot.label(),
        escape_html(text)
    )
}

fn push(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(s.as_bytes());
}

pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::location::LocationResolver;
    use chrono::{Local, TimeZone};
    use hyper::body::Bytes;

    fn page(freshness: Freshness, title: &str) -> PageModel {
        PageModel {
            title: title.to_string(),
            location: LocationResolver::new("x").resolve(None),
            freshness,
            slots: vec![
                PageSlot {
                    slot: FragmentSlot::NewCases,
                    fragment: "x_new_cases.html".to_string(),
                    content: SlotContent::Loaded(Bytes::from("<div id=\"chart\"></div>")),
                },
                PageSlot {
                    slot: FragmentSlot::Trend,
                    fragment: "x_trend.html".to_string(),
                    content: SlotContent::Unavailable(FragmentError::NotFound {
                        name: "x_trend.html".to_string(),
                    }),
                },
                PageSlot {
                    slot: FragmentSlot::Target,
                    fragment: "x_yellow_target.html".to_string(),
                    content: SlotContent::Loaded(Bytes::from("<div>target</div>")),
                },
            ],
            footer: "Created by <a href=\"https://twitter.com/richwiss/\">@richwiss</a>".to_string(),
            columns: 2,
        }
    }

    fn render(page: &PageModel) -> String {
        String::from_utf8(render_page(page, "data not available")).unwrap()
    }

    #[test]
    fn test_render_fragments_and_placeholder() {
        let at = Local.with_ymd_and_hms(2020, 11, 2, 9, 5, 7).unwrap();
        let html = render(&page(Freshness::known(at), "SARS-CoV-2: Chester"));

        assert!(html.contains("<title>SARS-CoV-2: Chester</title>"));
        assert!(html.contains("<div id=\"chart\"></div>"));
        assert!(html.contains("Trend: data not available"));
        assert!(html.contains(">Monday November 02, 2020 at 09:05:07</time>"));
        assert!(html.contains("data-fragment=\"x_trend.html\""));
        assert!(html.contains("title=\"fragment &#39;x_trend.html&#39; not found\""));
        assert!(html.contains("@richwiss</a>"));
        // 3 slots in 2 columns
        assert_eq!(html.matches("<tr>").count(), 2);
    }

    #[test]
    fn test_render_unknown_freshness() {
        let html = render(&page(Freshness::Unknown, "t"));
        assert!(html.contains("Data Last Updated: <span class=\"unknown\">unknown</span>"));
    }

    #[test]
    fn test_render_escapes_title() {
        let html = render(&page(Freshness::Unknown, "<script>alert('x')</script>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    fn table_page(content: SlotContent) -> PageModel {
        PageModel {
            title: "Covid-19 Graphs for Pennsylvania".to_string(),
            location: LocationResolver::new("x").resolve(Some("Pennsylvania")),
            freshness: Freshness::Unknown,
            slots: vec![PageSlot {
                slot: FragmentSlot::Table,
                fragment: "Pennsylvania_table.html".to_string(),
                content,
            }],
            footer: String::new(),
            columns: 1,
        }
    }

    #[test]
    fn test_render_table_rows_inside_tbody() {
        let rows = "<tr><td>PA</td><td>SE</td><td>Chester</td><td>12</td><td>up</td><td>3</td></tr>\n";
        let html = render(&table_page(SlotContent::Loaded(Bytes::from(rows))));

        let thead = html.find("<thead>").unwrap();
        let tbody = html.find("<tbody").unwrap();
        let first_row = html.find("<td>PA</td>").unwrap();
        let tbody_end = html.find("</tbody>").unwrap();
        assert!(thead < tbody && tbody < first_row && first_row < tbody_end);
        assert!(html.contains("<th>State</th>"));
        assert!(html.contains("<th>Yellow Target</th>"));
        assert_eq!(html.matches("<th>").count(), 6);
        // Rows are not nested in a grid cell
        assert!(!html.contains("<td class=\"slot-table\""));
        assert!(!html.contains("<td><tr>"));
    }

    #[test]
    fn test_render_missing_table_spans_columns() {
        let html = render(&table_page(SlotContent::Unavailable(FragmentError::NotFound {
            name: "Pennsylvania_table.html".to_string(),
        })));
        assert!(html.contains("<tr><td colspan=\"6\"><span class=\"unavailable\""));
        assert!(html.contains("Summary: data not available</span></td></tr>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"q\""), "&quot;q&quot;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
