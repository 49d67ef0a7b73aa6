//! Wire types for the DOI registration service.
//!
//! The service speaks an attribute/value JSON convention derived from its XML
//! schema: element attributes appear as `"@name"` keys and text content under
//! `"$"`. This module provides serde types for the two payload shapes the
//! client exchanges — the metadata resource document (POST body, and the
//! response body of create and fetch) and the status document returned by the
//! status poll — plus the conversions between the wire resource and the
//! in-memory [`MetadataRecord`].
//!
//! The resource document carries the minimal fixed schema only: identifier,
//! creators, titles, publisher, publication year, and resource type under the
//! DataCite kernel-4 namespace.

use super::*;

/// Metadata schema namespace stamped on every resource document.
pub const DATACITE_XMLNS: &str = "http://datacite.org/schema/kernel-4";

/// Top-level envelope for the metadata record, as POSTed to and returned by
/// the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDocument {
  /// The single resource this document describes.
  pub resource: Resource,
}

/// The metadata resource: the fixed schema fields in wire form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
  /// Schema namespace; always [`DATACITE_XMLNS`].
  #[serde(rename = "@xmlns")]
  pub xmlns:            String,
  /// The DOI assigned to (or requested for) the dataset.
  pub identifier:       Identifier,
  /// Ordered author list.
  pub creators:         CreatorList,
  /// Title list; always exactly one language-tagged entry.
  pub titles:           TitleList,
  /// Publishing organization.
  pub publisher:        TextNode,
  /// Publication year; the service may return a number where the form
  /// submitted text.
  #[serde(rename = "publicationYear")]
  pub publication_year: YearNode,
  /// Fixed resource type stanza.
  #[serde(rename = "resourceType")]
  pub resource_type:    ResourceType,
}

/// The typed identifier element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
  /// Identifier type attribute; always `"DOI"`.
  #[serde(rename = "@identifierType")]
  pub identifier_type: String,
  /// The DOI string itself.
  #[serde(rename = "$")]
  pub value:           String,
}

/// A plain text element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
  /// The element's text content.
  #[serde(rename = "$")]
  pub value: String,
}

/// The publication year element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearNode {
  /// Year content; number or text depending on who produced the document.
  #[serde(rename = "$")]
  pub value: YearValue,
}

/// Year content, accepted as a number or as text interchangeably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
  /// Year as a JSON number.
  Number(i32),
  /// Year as a JSON string.
  Text(String),
}

impl std::fmt::Display for YearValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      YearValue::Number(year) => write!(f, "{year}"),
      YearValue::Text(year) => write!(f, "{year}"),
    }
  }
}

/// The creator list element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatorList {
  /// Ordered creator entries.
  #[serde(rename = "$")]
  pub entries: Vec<CreatorEntry>,
}

/// One entry in the creator list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorEntry {
  /// The wrapped creator stanza.
  pub creator: CreatorStanza,
}

/// A creator stanza: composed name plus its two components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorStanza {
  /// Composed, typed creator name.
  #[serde(rename = "creatorName")]
  pub creator_name: CreatorName,
  /// Given (first) name.
  #[serde(rename = "givenName")]
  pub given_name:   TextNode,
  /// Family (last) name.
  #[serde(rename = "familyName")]
  pub family_name:  TextNode,
}

/// The typed creator name element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorName {
  /// Name type attribute; always `"Personal"`.
  #[serde(rename = "@nameType")]
  pub name_type: String,
  /// Composed display name, `"given, family"`.
  #[serde(rename = "$")]
  pub value:     String,
}

/// The title list element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleList {
  /// Title entries; the single-title model keeps exactly one.
  #[serde(rename = "$")]
  pub entries: Vec<TitleEntry>,
}

/// One entry in the title list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleEntry {
  /// The wrapped, language-tagged title.
  pub title: Title,
}

/// A language-tagged title element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
  /// Language tag; always [`document::TITLE_LANG`].
  #[serde(rename = "@xml:lang")]
  pub lang:  String,
  /// The title text.
  #[serde(rename = "$")]
  pub value: String,
}

/// The fixed resource type stanza.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceType {
  /// General resource type attribute; always `"Dataset"`.
  #[serde(rename = "@resourceTypeGeneral")]
  pub general: String,
  /// Resource type text; always `"Dataset"`.
  #[serde(rename = "$")]
  pub value:   String,
}

/// Envelope for the status poll response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDocument {
  /// The wrapped status body.
  pub doistatus: DoiStatus,
}

/// Registration status for one DOI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoiStatus {
  /// The DOI the status describes.
  pub identifier:     TextNode,
  /// Registration status text (e.g. `"DRAFT"`, `"MINTED"`).
  pub status:         TextNode,
  /// Path of the data directory associated with the DOI.
  #[serde(rename = "dataDirectory")]
  pub data_directory: TextNode,
}

impl ResourceDocument {
  /// Projects a [`MetadataRecord`] into its wire representation.
  pub fn from_record(record: &MetadataRecord) -> Self {
    let creators = record
      .creators
      .iter()
      .map(|creator| CreatorEntry {
        creator: CreatorStanza {
          creator_name: CreatorName {
            name_type: "Personal".to_string(),
            value:     creator.full_name.clone(),
          },
          given_name:   TextNode { value: creator.given_name.clone() },
          family_name:  TextNode { value: creator.family_name.clone() },
        },
      })
      .collect();

    let year = match record.publication_year.parse::<i32>() {
      Ok(year) => YearValue::Number(year),
      Err(_) => YearValue::Text(record.publication_year.clone()),
    };

    Self {
      resource: Resource {
        xmlns:            DATACITE_XMLNS.to_string(),
        identifier:       Identifier {
          identifier_type: "DOI".to_string(),
          value:           record.identifier.clone(),
        },
        creators:         CreatorList { entries: creators },
        titles:           TitleList {
          entries: vec![TitleEntry {
            title: Title {
              lang:  document::TITLE_LANG.to_string(),
              value: record.title.clone(),
            },
          }],
        },
        publisher:        TextNode { value: record.publisher.clone() },
        publication_year: YearNode { value: year },
        resource_type:    ResourceType {
          general: document::RESOURCE_TYPE.to_string(),
          value:   document::RESOURCE_TYPE.to_string(),
        },
      },
    }
  }
}

impl From<Resource> for MetadataRecord {
  fn from(resource: Resource) -> Self {
    Self {
      identifier:       resource.identifier.value,
      creators:         resource
        .creators
        .entries
        .into_iter()
        .map(|entry| Creator {
          full_name:   entry.creator.creator_name.value,
          given_name:  entry.creator.given_name.value,
          family_name: entry.creator.family_name.value,
        })
        .collect(),
      title:            resource
        .titles
        .entries
        .into_iter()
        .next()
        .map(|entry| entry.title.value)
        .unwrap_or_default(),
      publisher:        resource.publisher.value,
      publication_year: resource.publication_year.value.to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Wire document for a record with one creator, as the service emits it.
  const SAMPLE_RESOURCE: &str = r#"{
    "resource": {
      "@xmlns": "http://datacite.org/schema/kernel-4",
      "identifier": { "@identifierType": "DOI", "$": "10.11570/AB.1234" },
      "creators": {
        "$": [
          {
            "creator": {
              "creatorName": { "@nameType": "Personal", "$": "Jane, Smith" },
              "givenName": { "$": "Jane" },
              "familyName": { "$": "Smith" }
            }
          }
        ]
      },
      "titles": { "$": [ { "title": { "@xml:lang": "en-US", "$": "Gas Survey" } } ] },
      "publisher": { "$": "CADC" },
      "publicationYear": { "$": 2024 },
      "resourceType": { "@resourceTypeGeneral": "Dataset", "$": "Dataset" }
    }
  }"#;

  #[test]
  fn test_resource_document_deserializes() -> anyhow::Result<()> {
    let document: ResourceDocument = serde_json::from_str(SAMPLE_RESOURCE)?;
    let resource = &document.resource;
    assert_eq!(resource.xmlns, DATACITE_XMLNS);
    assert_eq!(resource.identifier.value, "10.11570/AB.1234");
    assert_eq!(resource.creators.entries.len(), 1);
    assert_eq!(resource.publication_year.value, YearValue::Number(2024));
    Ok(())
  }

  #[test]
  fn test_server_resource_replaces_record_wholesale() -> anyhow::Result<()> {
    let document: ResourceDocument = serde_json::from_str(SAMPLE_RESOURCE)?;
    let record: MetadataRecord = document.resource.into();
    assert_eq!(record.identifier, "10.11570/AB.1234");
    assert_eq!(record.title, "Gas Survey");
    assert_eq!(record.publisher, "CADC");
    assert_eq!(record.publication_year, "2024");
    assert_eq!(record.creators[0].full_name, "Jane, Smith");
    Ok(())
  }

  #[test]
  fn test_record_projection_keeps_fixed_attributes() -> anyhow::Result<()> {
    let mut doi_document = DoiDocument::new();
    doi_document.set_title("Gas Survey");
    doi_document.set_publication_year("2024");
    doi_document.set_creators_from_text("Smith, Jane")?;

    let value = serde_json::to_value(doi_document.to_wire_format())?;
    let resource = &value["resource"];
    assert_eq!(resource["@xmlns"], DATACITE_XMLNS);
    assert_eq!(resource["identifier"]["@identifierType"], "DOI");
    assert_eq!(resource["resourceType"]["@resourceTypeGeneral"], "Dataset");
    assert_eq!(resource["resourceType"]["$"], "Dataset");
    assert_eq!(resource["publicationYear"]["$"], 2024);
    assert_eq!(resource["titles"]["$"][0]["title"]["@xml:lang"], "en-US");
    assert_eq!(resource["creators"]["$"][0]["creator"]["creatorName"]["$"], "Jane, Smith");
    Ok(())
  }

  #[test]
  fn test_year_value_accepts_text_or_number() -> anyhow::Result<()> {
    let year: YearValue = serde_json::from_str("\"2025\"")?;
    assert_eq!(year.to_string(), "2025");
    let year: YearValue = serde_json::from_str("2025")?;
    assert_eq!(year.to_string(), "2025");
    Ok(())
  }

  #[test]
  fn test_status_document_deserializes() -> anyhow::Result<()> {
    let payload = r#"{
      "doistatus": {
        "identifier": { "$": "10.11570/AB.1234" },
        "status": { "$": "MINTED" },
        "dataDirectory": { "$": "/AB.1234/data" }
      }
    }"#;
    let document: StatusDocument = serde_json::from_str(payload)?;
    assert_eq!(document.doistatus.status.value, "MINTED");
    assert_eq!(document.doistatus.data_directory.value, "/AB.1234/data");
    Ok(())
  }
}
