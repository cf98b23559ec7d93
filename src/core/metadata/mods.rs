//! MODS (Metadata Object Description Schema) generation
//!
//! The rich schema output. Child order within `<mods>` is fixed:
//! title, names, origin info, abstract, resource type.

use super::document::{Element, MetadataDocument, Schema};
use super::{non_blank, validate_creators};
use crate::domain::{MetadataError, Record};

pub const MODS_NAMESPACE: &str = "http://www.loc.gov/mods/v3";
pub const MODS_SCHEMA_LOCATION: &str =
    "http://www.loc.gov/mods/v3 http://www.loc.gov/standards/mods/mods.xsd";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

fn mods_root() -> Element {
    Element::new("mods")
        .attr("xmlns", MODS_NAMESPACE)
        .attr("xmlns:mods", MODS_NAMESPACE)
        .attr("xmlns:xsi", XSI_NAMESPACE)
        .attr("xmlns:xlink", XLINK_NAMESPACE)
        .attr("xsi:schemaLocation", MODS_SCHEMA_LOCATION)
}

/// Builds the MODS document for a record.
///
/// # Errors
///
/// Returns [`MetadataError::MissingFamilyName`] when a creator has no family
/// name.
///
/// # Examples
///
/// ```
/// use voyant_export::core::metadata::generate_rich;
/// use voyant_export::domain::{Creator, Record};
///
/// let record = Record::builder("K1")
///     .title("Anne of Green Gables")
///     .creator(Creator::new(Some("Lucy Maud"), "Montgomery", "author"))
///     .build();
///
/// let xml = generate_rich(&record).unwrap().to_xml();
/// assert!(xml.contains("<namePart>Lucy Maud Montgomery</namePart>"));
/// ```
pub fn generate_rich(record: &Record) -> Result<MetadataDocument, MetadataError> {
    validate_creators(record)?;

    let mut root = mods_root();

    let title = record.title.trim();
    if !title.is_empty() {
        root.push(Element::new("titleInfo").child(Element::with_text("title", title)));
    }

    for creator in &record.creators {
        let mut name = Element::new("name")
            .attr("type", "personal")
            .child(Element::with_text("namePart", creator.full_name()));

        let role = creator.role.trim();
        if !role.is_empty() {
            name.push(
                Element::new("role")
                    .child(Element::with_text("roleTerm", role).attr("type", "text")),
            );
        }
        root.push(name);
    }

    if let Some(date) = non_blank(&record.date) {
        root.push(Element::new("originInfo").child(Element::with_text("dateIssued", date)));
    }

    if let Some(abstract_text) = non_blank(&record.abstract_text) {
        root.push(Element::with_text("abstract", abstract_text));
    }

    if let Some(item_type) = non_blank(&record.item_type) {
        root.push(Element::with_text("typeOfResource", item_type));
    }

    Ok(MetadataDocument::new(Schema::Mods, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Creator;

    fn child_names(doc: &MetadataDocument) -> Vec<String> {
        doc.root().elements().map(|e| e.name().to_string()).collect()
    }

    #[test]
    fn test_full_record_child_order() {
        let record = Record::builder("ABC123")
            .title("Test Article")
            .creator(Creator::new(Some("John"), "Doe", "author"))
            .creator(Creator::new(None::<String>, "Roe", "editor"))
            .date("2024-01-01")
            .abstract_text("An abstract")
            .item_type("journalArticle")
            .build();

        let doc = generate_rich(&record).unwrap();
        assert_eq!(
            child_names(&doc),
            vec!["titleInfo", "name", "name", "originInfo", "abstract", "typeOfResource"]
        );

        let xml = doc.to_xml();
        assert!(xml.contains("<title>Test Article</title>"));
        assert!(xml.contains("<namePart>John Doe</namePart>"));
        assert!(xml.contains("<dateIssued>2024-01-01</dateIssued>"));
        assert!(xml.contains("<typeOfResource>journalArticle</typeOfResource>"));
    }

    #[test]
    fn test_root_namespace_attributes() {
        let doc = generate_rich(&Record::builder("K").build()).unwrap();
        let root = doc.root();

        assert_eq!(root.name(), "mods");
        assert_eq!(root.attribute("xmlns"), Some(MODS_NAMESPACE));
        assert_eq!(
            root.attribute("xsi:schemaLocation"),
            Some(MODS_SCHEMA_LOCATION)
        );
    }

    #[test]
    fn test_empty_record_has_no_children() {
        let doc = generate_rich(&Record::builder("K").title("   ").build()).unwrap();
        assert!(child_names(&doc).is_empty());
    }

    #[test]
    fn test_role_omitted_when_empty() {
        let record = Record::builder("K")
            .creator(Creator::new(Some("Jane"), "Doe", ""))
            .build();
        let doc = generate_rich(&record).unwrap();
        let name = doc.root().elements().next().unwrap();

        assert_eq!(name.elements().count(), 1);
        assert!(!doc.to_xml().contains("<role>"));
    }

    #[test]
    fn test_role_term_present() {
        let record = Record::builder("K")
            .creator(Creator::new(Some("Lucy Maud"), "Montgomery", "author"))
            .build();
        let xml = generate_rich(&record).unwrap().to_xml();

        assert!(xml.contains("<name type=\"personal\">"));
        assert!(xml.contains("<roleTerm type=\"text\">author</roleTerm>"));
    }

    #[test]
    fn test_missing_family_name_is_error() {
        let record = Record::builder("K")
            .creator(Creator::new(Some("Ok"), "Fine", "author"))
            .creator(Creator::new(Some("Cher"), "", "author"))
            .build();

        assert_eq!(
            generate_rich(&record),
            Err(MetadataError::MissingFamilyName { index: 1 })
        );
    }
}
