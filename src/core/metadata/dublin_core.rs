//! Dublin Core (OAI-DC) generation
//!
//! The simple schema output, written to `DC.xml`.

use super::document::{Element, MetadataDocument, Schema};
use super::{non_blank, validate_creators};
use crate::domain::{MetadataError, Record};
use std::fmt;

pub const OAI_DC_NAMESPACE: &str = "http://www.openarchives.org/OAI/2.0/oai_dc/";
pub const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
pub const OAI_DC_SCHEMA_LOCATION: &str =
    "http://www.openarchives.org/OAI/2.0/oai_dc/ http://www.openarchives.org/OAI/2.0/oai_dc.xsd";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Coarse DCMI type categories used for `dc:type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DcType {
    Text,
    InteractiveResource,
    MovingImage,
    Sound,
    Image,
    Dataset,
    Software,
    Event,
}

impl DcType {
    /// Maps a catalog item type onto a category; unknown or absent types are
    /// [`DcType::Text`].
    pub fn from_item_type(item_type: Option<&str>) -> Self {
        match item_type.map(str::trim).unwrap_or_default() {
            "webpage" | "blogPost" | "forumPost" => DcType::InteractiveResource,
            "film" | "videoRecording" | "tvBroadcast" => DcType::MovingImage,
            "audioRecording" | "podcast" | "radioBroadcast" => DcType::Sound,
            "artwork" | "map" => DcType::Image,
            "dataset" => DcType::Dataset,
            "computerProgram" => DcType::Software,
            "presentation" | "hearing" => DcType::Event,
            _ => DcType::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DcType::Text => "Text",
            DcType::InteractiveResource => "InteractiveResource",
            DcType::MovingImage => "MovingImage",
            DcType::Sound => "Sound",
            DcType::Image => "Image",
            DcType::Dataset => "Dataset",
            DcType::Software => "Software",
            DcType::Event => "Event",
        }
    }
}

impl fmt::Display for DcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn dc_root() -> Element {
    Element::new("oai_dc:dc")
        .attr("xmlns:oai_dc", OAI_DC_NAMESPACE)
        .attr("xmlns:dc", DC_NAMESPACE)
        .attr("xmlns:xsi", XSI_NAMESPACE)
        .attr("xsi:schemaLocation", OAI_DC_SCHEMA_LOCATION)
}

/// Element name for a creator role: authors and creators fill `dc:creator`,
/// everything else (including an empty role) `dc:contributor`
fn creator_element(role: &str) -> &'static str {
    match role.trim() {
        "author" | "creator" => "dc:creator",
        _ => "dc:contributor",
    }
}

/// Builds the Dublin Core document for a record.
///
/// # Errors
///
/// Returns [`MetadataError::MissingIdentifier`] for a blank record id and
/// [`MetadataError::MissingFamilyName`] for a creator without family name.
pub fn generate_simple(record: &Record) -> Result<MetadataDocument, MetadataError> {
    if record.id.is_blank() {
        return Err(MetadataError::MissingIdentifier);
    }
    validate_creators(record)?;

    let mut root = dc_root();
    root.push(Element::with_text("dc:identifier", record.id.as_str()));

    let title = record.title.trim();
    if !title.is_empty() {
        root.push(Element::with_text("dc:title", title));
    }

    for creator in &record.creators {
        root.push(Element::with_text(
            creator_element(&creator.role),
            creator.full_name(),
        ));
    }

    if let Some(date) = non_blank(&record.date) {
        root.push(Element::with_text("dc:date", date));
    }

    if let Some(abstract_text) = non_blank(&record.abstract_text) {
        root.push(Element::with_text("dc:description", abstract_text));
    }

    let dc_type = DcType::from_item_type(record.item_type.as_deref());
    root.push(Element::with_text("dc:type", dc_type.as_str()));

    if let Some(publisher) = non_blank(&record.publisher) {
        root.push(Element::with_text("dc:publisher", publisher));
    }

    if let Some(language) = non_blank(&record.language) {
        root.push(Element::with_text("dc:language", language));
    }

    for tag in &record.tags {
        root.push(Element::with_text("dc:subject", tag.as_str()));
    }

    if let Some(rights) = non_blank(&record.rights) {
        root.push(Element::with_text("dc:rights", rights));
    }

    Ok(MetadataDocument::new(Schema::DublinCore, root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Creator;
    use test_case::test_case;

    fn child_names(doc: &MetadataDocument) -> Vec<String> {
        doc.root().elements().map(|e| e.name().to_string()).collect()
    }

    #[test_case(Some("book"), DcType::Text)]
    #[test_case(Some("journalArticle"), DcType::Text)]
    #[test_case(Some("webpage"), DcType::InteractiveResource)]
    #[test_case(Some("film"), DcType::MovingImage)]
    #[test_case(Some("audioRecording"), DcType::Sound)]
    #[test_case(Some("artwork"), DcType::Image)]
    #[test_case(Some("dataset"), DcType::Dataset)]
    #[test_case(Some("computerProgram"), DcType::Software)]
    #[test_case(Some("presentation"), DcType::Event)]
    #[test_case(Some("somethingNew"), DcType::Text)]
    #[test_case(None, DcType::Text)]
    fn test_dc_type_mapping(item_type: Option<&str>, expected: DcType) {
        assert_eq!(DcType::from_item_type(item_type), expected);
    }

    #[test]
    fn test_full_record_child_order() {
        let record = Record::builder("ABC123")
            .title("Test Book")
            .creator(Creator::new(Some("Jane"), "Doe", "author"))
            .creator(Creator::new(Some("Ed"), "Itor", "editor"))
            .date("1999")
            .abstract_text("About things")
            .item_type("book")
            .publisher("Press")
            .language("en")
            .tag("one")
            .tag("two")
            .rights("CC-BY")
            .build();

        let doc = generate_simple(&record).unwrap();
        assert_eq!(
            child_names(&doc),
            vec![
                "dc:identifier",
                "dc:title",
                "dc:creator",
                "dc:contributor",
                "dc:date",
                "dc:description",
                "dc:type",
                "dc:publisher",
                "dc:language",
                "dc:subject",
                "dc:subject",
                "dc:rights",
            ]
        );
    }

    #[test]
    fn test_minimal_record() {
        let doc = generate_simple(&Record::builder("ABC123").build()).unwrap();
        assert_eq!(child_names(&doc), vec!["dc:identifier", "dc:type"]);

        let xml = doc.to_xml();
        assert!(xml.contains("<dc:identifier>ABC123</dc:identifier>"));
        assert!(xml.contains("<dc:type>Text</dc:type>"));
    }

    #[test_case("author", "dc:creator")]
    #[test_case("creator", "dc:creator")]
    #[test_case("editor", "dc:contributor")]
    #[test_case("translator", "dc:contributor")]
    #[test_case("", "dc:contributor")]
    fn test_creator_role_mapping(role: &str, expected: &str) {
        assert_eq!(creator_element(role), expected);
    }

    #[test]
    fn test_blank_identifier_is_error() {
        let record = Record::builder("  ").title("x").build();
        assert_eq!(
            generate_simple(&record),
            Err(MetadataError::MissingIdentifier)
        );
    }

    #[test]
    fn test_subjects_keep_order_and_duplicates() {
        let record = Record::builder("K")
            .tag("b")
            .tag("a")
            .tag("b")
            .build();
        let doc = generate_simple(&record).unwrap();
        let subjects: Vec<String> = doc
            .root()
            .elements()
            .filter(|e| e.name() == "dc:subject")
            .map(Element::text)
            .collect();

        assert_eq!(subjects, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_root_namespace_attributes() {
        let doc = generate_simple(&Record::builder("K").build()).unwrap();
        assert_eq!(doc.root().name(), "oai_dc:dc");
        assert_eq!(doc.root().attribute("xmlns:dc"), Some(DC_NAMESPACE));
        assert_eq!(
            doc.root().attribute("xsi:schemaLocation"),
            Some(OAI_DC_SCHEMA_LOCATION)
        );
    }
}
