use crate::application::LedgerOverview;
use crate::domain::{BalanceSummary, Payer, Purchase, format_amount};

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: 0.3rem 0.5rem; border-bottom: 1px solid #ddd; }
td.amount, th.amount { text-align: right; }
.summary td { border: none; }
form.inline { display: inline; }
"#;

/// The listing page: entry form, balance summary and every purchase, newest first.
pub fn render_index(overview: &LedgerOverview) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n<title>Shared purchases</title>\n");
    html.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    html.push_str("<h1>Shared purchases</h1>\n");

    html.push_str(&entry_form());
    html.push_str(&summary(&overview.balance));
    html.push_str(&purchase_table(&overview.purchases));

    html.push_str("</body>\n</html>\n");
    html
}

fn entry_form() -> String {
    let options: String = Payer::ALL
        .iter()
        .map(|payer| {
            let selected = if *payer == Payer::default() {
                " selected"
            } else {
                ""
            };
            format!("<option value=\"{payer}\"{selected}>{payer}</option>")
        })
        .collect();

    format!(
        "<form method=\"post\" action=\"/\">\n\
         <input name=\"description\" placeholder=\"Description\" required>\n\
         <input name=\"amount\" placeholder=\"Amount\" inputmode=\"decimal\" required>\n\
         <select name=\"who\">{options}</select>\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n"
    )
}

fn summary(balance: &BalanceSummary) -> String {
    let rows = [
        ("Joe (own purchases)", balance.joe_independent),
        ("Kath (own purchases)", balance.kath_independent),
        ("Joint total", balance.joint_total),
        ("Joe owes", balance.joe_owes),
        ("Kath owes", balance.kath_owes),
    ];

    let mut html = String::from("<h2>Balance</h2>\n<table class=\"summary\">\n");
    for (label, amount) in rows {
        html.push_str(&format!(
            "<tr><td>{label}</td><td class=\"amount\">{}</td></tr>\n",
            format_amount(amount)
        ));
    }
    html.push_str("</table>\n");
    html
}

fn purchase_table(purchases: &[Purchase]) -> String {
    let mut html = String::from("<h2>Purchases</h2>\n");
    if purchases.is_empty() {
        html.push_str("<p>No purchases yet.</p>\n");
        return html;
    }

    html.push_str(
        "<table>\n<tr><th>Date</th><th>Description</th><th class=\"amount\">Amount</th>\
         <th>Who</th><th></th></tr>\n",
    );
    for purchase in purchases {
        html.push_str(&format!(
            "<tr><td>{date}</td><td>{description}</td><td class=\"amount\">{amount}</td>\
             <td>{who}</td><td><form class=\"inline\" method=\"post\" action=\"/delete/{id}\">\
             <button type=\"submit\">Delete</button></form></td></tr>\n",
            date = purchase.date_string(),
            description = escape_html(&purchase.description),
            amount = format_amount(purchase.amount),
            who = escape_html(&purchase.who),
            id = purchase.id,
        ));
    }
    html.push_str("</table>\n");
    html.push_str(
        "<form method=\"post\" action=\"/clear\">\
         <button type=\"submit\">Clear all</button></form>\n",
    );
    html
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
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
