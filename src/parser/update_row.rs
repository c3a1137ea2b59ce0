use getset::{CopyGetters, Getters};
use jobguide_scraping_utils::selector;
use log::trace;
use scraper::{ElementRef, Html, Selector};

/// A row flagged as updated, paired with the identifier of the row right after it.
#[derive(Clone, PartialEq, Eq, Debug, Getters, CopyGetters)]
pub struct UpdateRow {
    #[getset(get = "pub")]
    action_id: String,
    /// Seconds since the Unix epoch, always positive.
    #[getset(get_copy = "pub")]
    updated_at: i64,
    #[getset(get_copy = "pub")]
    is_new: bool,
    /// Trimmed `.sys_action_name` text of the identifier row, empty if absent.
    #[getset(get = "pub")]
    name: String,
    /// Trimmed `.sys_action_desc` text, empty if absent.
    #[getset(get = "pub")]
    description: String,
}

pub fn parse_update_rows(html: &Html) -> Vec<UpdateRow> {
    html.select(selector!("tr.update.js__jobguide_update_one.hide"))
        .filter_map(parse_update_row)
        .collect()
}

fn parse_update_row(row: ElementRef) -> Option<UpdateRow> {
    let updated_at = match parse_timestamp(row.value().attr("data-updated")) {
        Some(x) => x,
        None => {
            trace!("Skipping update row with timestamp {:?}", row.value().attr("data-updated"));
            return None;
        }
    };
    let action_row = row.next_siblings().find_map(ElementRef::wrap)?;
    let action_id = action_row.value().attr("id")?.to_owned();
    let name = trimmed_text(action_row, selector!(".sys_action_name"));
    let description = trimmed_text(action_row, selector!(".sys_action_desc"));
    let is_new = row.value().attr("data-new") == Some("1");
    Some(UpdateRow {
        action_id,
        updated_at,
        is_new,
        name,
        description,
    })
}

fn trimmed_text(element: ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_owned())
        .unwrap_or_default()
}

fn parse_timestamp(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse().ok().filter(|&x| x > 0)
}
