//! Enumerations sent as query parameters, headers or payload fields.

use crate::params::wire_enum;

wire_enum! {
    /// Data center region, sent as the `x-ads-region` header.
    pub enum Region {
        Us => "US",
        Emea => "EMEA",
        Aus => "AUS",
        Can => "CAN",
        Deu => "DEU",
        Ind => "IND",
        Jpn => "JPN",
        Gbr => "GBR",
    }
}

wire_enum! {
    /// Resource type accepted by `filter[type]`.
    pub enum FilterType {
        Folders => "folders",
        Items => "items",
        Versions => "versions",
    }
}

wire_enum! {
    /// Relationship kind accepted by `filter[refType]`.
    pub enum RefType {
        Derived => "derived",
        Dependencies => "dependencies",
        Auxiliary => "auxiliary",
        Xrefs => "xrefs",
        Includes => "includes",
    }
}

wire_enum! {
    /// Side of a relationship accepted by `filter[direction]`.
    pub enum RefDirection {
        From => "from",
        To => "to",
    }
}

wire_enum! {
    pub enum HookStatus {
        Active => "active",
        Inactive => "inactive",
        Reactivated => "reactivated",
    }
}

wire_enum! {
    /// Ordering of hooks by creation date.
    pub enum SortOrder {
        Asc => "asc",
        Desc => "desc",
    }
}

wire_enum! {
    /// Event source a webhook is registered against.
    pub enum WebhookSystem {
        Data => "data",
        Derivative => "derivative",
        WipProd => "adsk.wipprod",
        Revit => "adsk.c4r",
        FusionLifecycle => "adsk.flc.production",
        ConstructionCost => "autodesk.construction.cost",
    }
}
