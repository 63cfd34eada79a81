use serde::{Deserialize, Serialize};
use url::Url;

/// Schemes RTTI route map links may use.
const SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

/// Location of a route map file, in KMZ format.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase", try_from = "RouteMapRecord")]
pub struct RouteMap {
    /// Always absolute, over http(s) or ftp(s).
    pub href: Url,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RouteMapRecord {
    href: Url,
}

impl TryFrom<RouteMapRecord> for RouteMap {
    type Error = String;

    fn try_from(record: RouteMapRecord) -> Result<Self, Self::Error> {
        if !SCHEMES.contains(&record.href.scheme()) {
            return Err(format!(
                "route map {:?} is not an http(s) or ftp(s) URL",
                record.href.as_str()
            ));
        }
        Ok(RouteMap { href: record.href })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_href() {
        let map: RouteMap =
            serde_json::from_str(r#"{"Href": "http://nb.translink.ca/geodata/trip/324-NB1.kmz"}"#).unwrap();
        assert_eq!(map.href.as_str(), "http://nb.translink.ca/geodata/trip/324-NB1.kmz");

        for href in ["https://a.example/x.kmz", "ftp://a.example/x.kmz", "ftps://a.example/x.kmz"] {
            let body = format!(r#"{{"Href": "{}"}}"#, href);
            assert!(serde_json::from_str::<RouteMap>(&body).is_ok(), "{href}");
        }
    }

    #[test]
    fn relative_href_is_rejected() {
        assert!(serde_json::from_str::<RouteMap>(r#"{"Href": "geodata/trip/324-NB1.kmz"}"#).is_err());
        assert!(serde_json::from_str::<RouteMap>(r#"{"Href": ""}"#).is_err());
        assert!(serde_json::from_str::<RouteMap>(r#"{}"#).is_err());
    }

    #[test]
    fn other_schemes_are_rejected() {
        for href in ["mailto:x", "foo:bar", "file:///etc/passwd", "javascript:alert(1)"] {
            let body = format!(r#"{{"Href": "{}"}}"#, href);
            let err = serde_json::from_str::<RouteMap>(&body).unwrap_err();
            assert!(err.to_string().contains("not an http(s) or ftp(s) URL"), "{err}");
        }
    }
}
