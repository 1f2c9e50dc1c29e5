//! Column sets and table options for each console resource.

use serde_json::Value;

use crate::api::Resource;
use crate::model::BlacklistScope;
use crate::model::BlacklistValueType;
use crate::model::MarketType;
use crate::model::PolicyType;
use crate::model::Record;
use crate::model::ReportType;
use crate::model::Role;
use crate::model::active_label;
use crate::model::display_value;
use crate::model::yes_no;

use super::Column;
use super::TableOptions;

fn label_with(label_for: fn(&str) -> String) -> impl Fn(Option<&Value>) -> String + Send + Sync {
    move |value| match value {
        Some(Value::String(wire)) => label_for(wire),
        other => display_value(other),
    }
}

fn active(value: Option<&Value>) -> String {
    active_label(value.and_then(Value::as_bool).unwrap_or(false)).to_string()
}

fn or_dash(value: Option<&Value>) -> String {
    match display_value(value) {
        text if text.is_empty() => "-".to_string(),
        text => text,
    }
}

fn subscription(value: Option<&Value>) -> String {
    match value.and_then(Value::as_u64) {
        Some(30) => "Monthly".to_string(),
        Some(365) => "Yearly".to_string(),
        Some(days) => format!("{days} days"),
        None => String::new(),
    }
}

/// Columns shown on the listing of `resource`.
pub fn columns_for(resource: Resource) -> Vec<Column<Record>> {
    match resource {
        Resource::Users => vec![
            Column::new("Full name", "fullname"),
            Column::new("E-mail", "email"),
            Column::new("Role", "role").map_value(label_with(Role::label_for)),
        ],
        Resource::MarketDetails => vec![
            Column::new("Logo", "logo"),
            Column::new("Name", "name"),
            Column::new("Code", "code"),
            Column::new("Type", "type").map_value(label_with(MarketType::label_for)),
        ],
        Resource::VipChannels => vec![
            Column::new("Logo", "thumbnail"),
            Column::new("Name", "name"),
            Column::new("Members", "memberCount"),
            Column::new("Active", "isActive").map_value(active),
            Column::new("Rank", "rank"),
        ],
        Resource::AllChannels => vec![
            Column::new("Logo", "thumbnail"),
            Column::new("Name", "name"),
            Column::new("Members", "memberCount"),
            Column::new("VIP", "type").map_value(|value| {
                yes_no(value.and_then(Value::as_str) == Some("vip")).to_string()
            }),
        ],
        Resource::Products => vec![
            Column::new("Name", "name"),
            Column::new("Subscription", "timeDays").map_value(subscription),
            Column::new("Active", "isActive").map_value(active),
        ],
        Resource::Policies => vec![
            Column::new("Title", "title"),
            Column::new("Type", "type").map_value(label_with(PolicyType::label_for)),
        ],
        Resource::Suggestions => vec![
            Column::new("Title", "title"),
            Column::new("Type", "type"),
        ],
        Resource::Reports => vec![
            Column::new("Type", "type").map_value(label_with(ReportType::label_for)),
            Column::new("User", "user.fullname"),
            Column::new("Subject", "subject").map_value(or_dash),
        ],
        Resource::Blacklist => vec![
            Column::new("Scope", "scope").map_value(label_with(BlacklistScope::label_for)),
            Column::new("Value type", "type").map_value(label_with(BlacklistValueType::label_for)),
            Column::new("Value", "value"),
            Column::new("Resource", "resource").map_value(or_dash),
            Column::new("Active", "isActive").map_value(active),
        ],
    }
}

/// Table options matching what the listing of `resource` offers.
pub fn options_for(resource: Resource) -> TableOptions {
    TableOptions {
        search_enabled: resource.search_enabled(),
        delete_visible: resource.supports_delete(),
        edit_visible: resource.edit_enabled(),
        default_sort: resource.default_sort(),
        ..TableOptions::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::Row;

    fn render(resource: Resource, value: Value) -> Vec<String> {
        let record = Record::from_value(value)
            .unwrap()
            .with_id_field(resource.id_field());
        columns_for(resource)
            .iter()
            .map(|column| column.render(&record))
            .collect()
    }

    #[test]
    fn test_every_resource_has_columns() {
        for resource in Resource::ALL {
            assert!(!columns_for(resource).is_empty(), "{resource}");
        }
    }

    #[test]
    fn test_report_columns() {
        let cells = render(
            Resource::Reports,
            json!({"id": "r1", "type": "spam", "user": {"fullname": "Ali Veli"}, "subject": null}),
        );
        assert_eq!(cells, ["Spam report", "Ali Veli", "-"]);
    }

    #[test]
    fn test_label_passes_unknown_values_through() {
        let cells = render(
            Resource::Users,
            json!({"id": "u1", "fullname": "A", "email": "a@b.c", "role": "auditor"}),
        );
        assert_eq!(cells[2], "auditor");
    }

    #[test]
    fn test_product_columns() {
        let cells = render(
            Resource::Products,
            json!({"id": "p1", "name": "Gold", "timeDays": 365, "isActive": false}),
        );
        assert_eq!(cells, ["Gold", "Yearly", "Inactive"]);
    }

    #[test]
    fn test_market_rows_keyed_by_code() {
        let record = Record::from_value(json!({"code": "BIST", "name": "Borsa"}))
            .unwrap()
            .with_id_field(Resource::MarketDetails.id_field());
        assert_eq!(record.row_id().as_str(), "BIST");
        assert!(options_for(Resource::MarketDetails).edit_visible);
        assert!(!options_for(Resource::Reports).delete_visible);
        assert!(!options_for(Resource::Policies).search_enabled);
    }
}
