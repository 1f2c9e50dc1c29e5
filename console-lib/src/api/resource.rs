//! Catalog of the REST resources managed by the console.

use std::fmt;
use std::str::FromStr;

use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::utf8_percent_encode;

use crate::api::query::SortSpec;

/// Characters escaped when an id is placed in a path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A listable REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    MarketDetails,
    VipChannels,
    AllChannels,
    Products,
    Policies,
    Suggestions,
    Reports,
    Blacklist,
}

impl Resource {
    /// Every resource, in sidebar order.
    pub const ALL: [Resource; 9] = [
        Resource::Users,
        Resource::VipChannels,
        Resource::AllChannels,
        Resource::MarketDetails,
        Resource::Products,
        Resource::Policies,
        Resource::Suggestions,
        Resource::Reports,
        Resource::Blacklist,
    ];

    /// Short name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::MarketDetails => "markets",
            Self::VipChannels => "vip-channels",
            Self::AllChannels => "channels",
            Self::Products => "products",
            Self::Policies => "policies",
            Self::Suggestions => "suggestions",
            Self::Reports => "reports",
            Self::Blacklist => "blacklist",
        }
    }

    /// Human readable title of the listing.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Users => "Users",
            Self::MarketDetails => "Markets",
            Self::VipChannels => "VIP Channels",
            Self::AllChannels => "All Channels",
            Self::Products => "Products",
            Self::Policies => "Policies",
            Self::Suggestions => "Suggestions",
            Self::Reports => "Reports",
            Self::Blacklist => "Blacklist",
        }
    }

    /// Path of the listing endpoint.
    pub fn list_path(&self) -> &'static str {
        match self {
            Self::Users => "/users",
            Self::MarketDetails => "/market-details",
            Self::VipChannels => "/channels/vip",
            Self::AllChannels => "/channels/all",
            Self::Products => "/products",
            Self::Policies => "/policies",
            Self::Suggestions => "/suggestions",
            Self::Reports => "/reports",
            Self::Blacklist => "/blacklist/",
        }
    }

    fn item_base(&self) -> &'static str {
        match self {
            Self::Users => "/users",
            Self::MarketDetails => "/market-details",
            Self::VipChannels | Self::AllChannels => "/channels",
            Self::Products => "/products",
            Self::Policies => "/policies",
            Self::Suggestions => "/suggestions",
            Self::Reports => "/reports",
            Self::Blacklist => "/blacklist",
        }
    }

    /// Path of a single item, with the id percent-encoded.
    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.item_base(), utf8_percent_encode(id, PATH_SEGMENT))
    }

    /// Field holding the row identifier used for detail and delete calls.
    pub fn id_field(&self) -> &'static str {
        match self {
            Self::MarketDetails => "code",
            Self::Policies => "type",
            _ => "id",
        }
    }

    /// Whether the listing offers a search box.
    pub fn search_enabled(&self) -> bool {
        !matches!(self, Self::Policies | Self::Suggestions)
    }

    /// Whether the listing shows an edit action.
    pub fn edit_enabled(&self) -> bool {
        matches!(self, Self::Users | Self::MarketDetails)
    }

    /// Whether the API accepts `DELETE` on items of this resource.
    pub fn supports_delete(&self) -> bool {
        !matches!(self, Self::Reports)
    }

    /// Initial ordering of the listing.
    pub fn default_sort(&self) -> SortSpec {
        SortSpec::default()
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resource name that matched nothing in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource '{0}'")]
pub struct UnknownResource(pub String);

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.name() == s)
            .ok_or_else(|| UnknownResource(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_resource_names() {
        assert_eq!("markets".parse::<Resource>(), Ok(Resource::MarketDetails));
        assert_eq!("vip-channels".parse::<Resource>(), Ok(Resource::VipChannels));
        assert!("widgets".parse::<Resource>().is_err());
    }

    #[test]
    fn test_channel_items_share_a_path() {
        assert_eq!(Resource::VipChannels.item_path("c1"), "/channels/c1");
        assert_eq!(Resource::AllChannels.item_path("c1"), "/channels/c1");
        assert_eq!(Resource::Blacklist.list_path(), "/blacklist/");
        assert_eq!(Resource::Blacklist.item_path("b 1"), "/blacklist/b%201");
        assert_eq!(Resource::Users.item_path("a/b"), "/users/a%2Fb");
    }

    #[test]
    fn test_id_fields() {
        assert_eq!(Resource::MarketDetails.id_field(), "code");
        assert_eq!(Resource::Policies.id_field(), "type");
        assert_eq!(Resource::Users.id_field(), "id");
    }
}
