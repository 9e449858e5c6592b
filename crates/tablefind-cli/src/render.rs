//! Plain-text rendering of canonical records.

use tablefind_core::CanonicalRestaurant;

const NAME_WIDTH: usize = 32;
const EM_DASH: &str = "\u{2014}";

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Result table with a `*` marker on favorites.
pub(crate) fn results_table<'a>(
    records: impl IntoIterator<Item = &'a CanonicalRestaurant>,
    is_favorite: impl Fn(&str) -> bool,
) -> String {
    let mut out = format!(
        "  {:<30}{:<35}{:<8}{:<6}ADDRESS\n",
        "KEY", "NAME", "RATING", "PRICE"
    );
    for record in records {
        let marker = if is_favorite(&record.id) { '*' } else { ' ' };
        let rating = record
            .rating
            .map_or_else(|| EM_DASH.to_string(), |r| format!("{r:.1}"));
        out.push_str(&format!(
            "{marker} {:<30}{:<35}{:<8}{:<6}{}\n",
            record.detail_key(),
            truncate(&record.name, NAME_WIDTH),
            rating,
            record.price_symbols(),
            record.address.as_deref().unwrap_or(EM_DASH),
        ));
    }
    out
}

/// Multi-line detail card. `image_url` is the URL after any session fallback.
pub(crate) fn detail_card(record: &CanonicalRestaurant, image_url: &str, favorite: bool) -> String {
    let star = if favorite { " *" } else { "" };
    let mut out = format!("{}{star}\n", record.name);

    let rating = match (record.star_rating(), record.rating, record.review_count) {
        (Some(stars), Some(r), Some(n)) => format!("{stars} {r:.1} ({n} reviews)"),
        (Some(stars), Some(r), None) => format!("{stars} {r:.1}"),
        _ => EM_DASH.to_string(),
    };

    let lines: [(&str, Option<String>); 9] = [
        ("Address", record.address.clone()),
        ("Rating", Some(rating)),
        ("Price", Some(record.price_symbols())),
        (
            "Cuisines",
            (!record.cuisines.is_empty()).then(|| record.cuisines.join(", ")),
        ),
        ("Category", record.category.clone()),
        ("Phone", record.phone.clone()),
        ("Website", record.website.clone()),
        ("Status", record.status.clone()),
        ("Image", Some(image_url.to_string())),
    ];
    for (label, value) in lines {
        out.push_str(&format!(
            "  {:<10}{}\n",
            format!("{label}:"),
            value.as_deref().unwrap_or(EM_DASH)
        ));
    }
    out.push_str(&format!("  {:<10}{}\n", "Key:", record.detail_key()));
    out
}
