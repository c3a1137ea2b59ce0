use chrono::TimeZone;
use jobguide_scraping_utils::{regex, selector};
use log::debug;
use scraper::{Html, Selector};

use crate::{chrono_util::epoch_to_dmy, schema::SectionKind};

fn section_selector(kind: SectionKind) -> &'static Selector {
    match kind {
        SectionKind::Pve => selector!("div.js__select--pve"),
        SectionKind::Pvp => selector!("div.js__select--pvp"),
    }
}

/// Resolves the "last updated" label of a section, such as `Last updated: 14/11/2023`.
///
/// The banner only holds a placeholder element whose text is filled in by an inline
/// script of the form `document.getElementById('datetime-...').innerHTML =
/// ldst_strftime(1700000000, 'YMD')`, so the date is taken from that script.
/// Any missing piece yields `None`.
pub fn parse_section_update<Tz: TimeZone>(
    html: &Html,
    kind: SectionKind,
    tz: &Tz,
) -> Option<String> {
    let epoch = find_section_epoch(html, kind)?;
    let date = epoch_to_dmy(epoch, tz)?;
    Some(format!("Last updated: {date}"))
}

fn find_section_epoch(html: &Html, kind: SectionKind) -> Option<i64> {
    let section = html.select(section_selector(kind)).next()?;
    let banner = section.select(selector!("p.job__update")).next()?;
    let key = banner
        .select(selector!(r#"[id^="datetime-"]"#))
        .next()?
        .value()
        .id()?;

    let quoted = [format!("'{key}'"), format!("\"{key}\"")];
    let epoch = html
        .select(selector!("script"))
        .map(|script| script.text().collect::<String>())
        .filter(|text| quoted.iter().any(|q| text.contains(q.as_str())))
        .find_map(|text| parse_strftime_epoch(&text));
    if epoch.is_none() {
        debug!("No date found for {kind} section (key {key:?})");
    }
    epoch
}

fn parse_strftime_epoch(script: &str) -> Option<i64> {
    let captures = regex!(r"[A-Za-z_$][\w$]*\(\s*(\d+)\s*,\s*'YMD'\s*\)").captures(script)?;
    captures[1].parse().ok().filter(|&x: &i64| x > 0)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use scraper::Html;

    use super::{parse_section_update, parse_strftime_epoch};
    use crate::schema::SectionKind;

    const PVE_SECTION: &str = r#"
        <div class="js__select--pve">
          <p class="job__update">Last updated: <span id="datetime-5f3a9c">-</span></p>
        </div>"#;

    fn page(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn resolves_through_script() {
        let html = page(&format!(
            r#"{PVE_SECTION}
            <script>var unrelated = ldst_strftime(1500000000, 'YMD');</script>
            <script>document.getElementById('datetime-5f3a9c').innerHTML = ldst_strftime(1700000000, 'YMD');</script>"#
        ));
        assert_eq!(
            parse_section_update(&html, SectionKind::Pve, &Utc).as_deref(),
            Some("Last updated: 14/11/2023")
        );
        assert_eq!(parse_section_update(&html, SectionKind::Pvp, &Utc), None);
    }

    #[test]
    fn no_matching_script() {
        let html = page(&format!(
            r#"{PVE_SECTION}
            <script>document.getElementById('datetime-5f3a9c0').innerHTML = ldst_strftime(1700000000, 'YMD');</script>"#
        ));
        assert_eq!(parse_section_update(&html, SectionKind::Pve, &Utc), None);
    }

    #[test]
    fn missing_structure() {
        let script = r#"<script>document.getElementById('datetime-1').innerHTML = ldst_strftime(1700000000, 'YMD');</script>"#;
        for body in [
            // banner outside of the section
            r#"<div class="js__select--pve"></div><p class="job__update"><span id="datetime-1"></span></p>"#,
            // no banner
            r#"<div class="js__select--pve"><span id="datetime-1"></span></div>"#,
            // no correlation element
            r#"<div class="js__select--pve"><p class="job__update"><span id="date-1"></span></p></div>"#,
        ] {
            let html = page(&format!("{body}{script}"));
            assert_eq!(parse_section_update(&html, SectionKind::Pve, &Utc), None, "{body}");
        }
    }

    #[test]
    fn malformed_epoch() {
        for call in [
            "ldst_strftime(0, 'YMD')",
            "ldst_strftime(-1700000000, 'YMD')",
            "ldst_strftime(1700000000, 'HM')",
            "ldst_strftime('1700000000', 'YMD')",
            "ldst_strftime(99999999999999999999, 'YMD')",
        ] {
            let html = page(&format!(
                r#"{PVE_SECTION}<script>document.getElementById('datetime-5f3a9c').innerHTML = {call};</script>"#
            ));
            assert_eq!(parse_section_update(&html, SectionKind::Pve, &Utc), None, "{call}");
        }
    }

    #[test]
    fn strftime_call_shapes() {
        assert_eq!(parse_strftime_epoch("ldst_strftime(1700000000,'YMD')"), Some(1700000000));
        assert_eq!(parse_strftime_epoch("fmt( 1700000000 , 'YMD' )"), Some(1700000000));
        assert_eq!(parse_strftime_epoch("(1700000000, 'YMD')"), None);
    }

    #[test]
    fn deterministic() {
        let html = page(&format!(
            r#"{PVE_SECTION}<script>document.getElementById("datetime-5f3a9c").innerHTML = ldst_strftime(1700000000, 'YMD');</script>"#
        ));
        let first = parse_section_update(&html, SectionKind::Pve, &Utc);
        assert!(first.is_some());
        assert_eq!(first, parse_section_update(&html, SectionKind::Pve, &Utc));
    }
}
