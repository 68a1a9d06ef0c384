use crate::core::engine::RunReport;
use crate::domain::model::AdAssetBundle;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    report: &'a RunReport,
}

pub fn to_json(report: &RunReport, generated_at: DateTime<Utc>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport {
        generated_at,
        report,
    })?)
}

#[derive(Serialize)]
struct AssetRow<'a> {
    asset_type: &'static str,
    group: &'a str,
    index: usize,
    field: &'static str,
    text: &'a str,
    length: usize,
}

/// One row per asset text. `length` is informational; nothing is truncated.
pub fn to_csv(bundle: &AdAssetBundle) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut write = |asset_type, group: &str, index, field, text: &str| {
        writer.serialize(AssetRow {
            asset_type,
            group,
            index,
            field,
            text,
            length: text.chars().count(),
        })
    };

    for variation in &bundle.variations {
        for (i, headline) in variation.headlines.iter().enumerate() {
            write("headline", &variation.service_focus, i + 1, "text", headline)?;
        }
        for (i, description) in variation.descriptions.iter().enumerate() {
            write("description", &variation.service_focus, i + 1, "text", description)?;
        }
    }
    for (i, sitelink) in bundle.sitelinks.iter().enumerate() {
        write("sitelink", "", i + 1, "text", &sitelink.text)?;
        write("sitelink", "", i + 1, "description_line1", &sitelink.description_line1)?;
        write("sitelink", "", i + 1, "description_line2", &sitelink.description_line2)?;
    }
    for group in &bundle.structured_snippets {
        for (i, value) in group.values.iter().enumerate() {
            write("structured_snippet", &group.header, i + 1, "value", value)?;
        }
    }
    for (i, callout) in bundle.callouts.iter().enumerate() {
        write("callout", "", i + 1, "text", callout)?;
    }

    writer
        .into_inner()
        .map_err(|e| crate::utils::error::AdGenError::Io(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AdCopyVariation, Sitelink, SnippetGroup};

    #[test]
    fn test_csv_rows_cover_every_asset() {
        let bundle = AdAssetBundle {
            variations: vec![AdCopyVariation {
                service_focus: "Drain Cleaning".to_string(),
                headlines: vec!["Fast, Clean Drains".to_string()],
                descriptions: vec!["Book today.".to_string()],
            }],
            sitelinks: vec![Sitelink {
                text: "Contact".to_string(),
                description_line1: "Call us".to_string(),
                description_line2: "Open daily".to_string(),
            }],
            structured_snippets: vec![SnippetGroup {
                header: "Services".to_string(),
                values: vec!["Repair".to_string()],
            }],
            callouts: vec!["Free Quotes".to_string()],
        };

        let csv = String::from_utf8(to_csv(&bundle).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines[0], "asset_type,group,index,field,text,length");
        assert_eq!(lines[1], "headline,Drain Cleaning,1,text,\"Fast, Clean Drains\",18");
        assert_eq!(lines[2], "description,Drain Cleaning,1,text,Book today.,11");
        assert_eq!(lines[4], "sitelink,,1,description_line1,Call us,7");
        assert_eq!(lines[6], "structured_snippet,Services,1,value,Repair,6");
        assert_eq!(lines[7], "callout,,1,text,Free Quotes,11");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_empty_bundle_writes_nothing() {
        assert!(to_csv(&AdAssetBundle::default()).unwrap().is_empty());
    }
}
