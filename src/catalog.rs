use crate::models::DashboardTab;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const FINANCIAL_HEALTH: &str = "Financial Health";
pub const DEMAND_SUPPLY_MISMATCH: &str = "Demand–Supply Mismatch";
pub const PRODUCTION_INVENTORY: &str = "Production & Inventory Health";
pub const LOGISTICS_DISTRIBUTION: &str = "Logistics & Distribution";
pub const SALES_MARKET: &str = "Sales, Revenue & Market Insights";
pub const STRATEGIC_PERFORMANCE: &str = "Strategic Performance";

static SECTION_BY_CATEGORY: &[(&str, &str)] = &[
    ("executive-summary", FINANCIAL_HEALTH),
    ("demand-supply", DEMAND_SUPPLY_MISMATCH),
    ("production", PRODUCTION_INVENTORY),
    ("logistics", LOGISTICS_DISTRIBUTION),
    ("market", SALES_MARKET),
];

static VIEW_KEY_BY_NAME: &[(&str, &str)] = &[
    // Financial health
    ("Gross Profit Margin", "grossProfitMargin"),
    ("Operating Profit Margin", "operatingProfitMargin"),
    ("Cash Flow from Operations", "cashFlowFromOperations"),
    ("Return on Investment", "returnOnInvestment"),
    // Demand-supply
    ("Order Fill Rate", "orderFillRate"),
    ("Stock-Out Instances per SKU", "stockOutInstancesPerSku"),
    ("Backorder Volume", "backorderVolume"),
    ("Forecast Accuracy", "forecastAccuracy"),
    (
        "SKU-Wise Sales vs Planned Production Variance",
        "skuWiseSalesVsPlannedProductionVariance",
    ),
    // Production
    ("Plant Utilization Rate", "plantUtilizationRate"),
    ("Production Cycle Time", "productionCycleTime"),
    ("Inventory Turnover Ratio", "inventoryTurnoverRatio"),
    ("Finished Goods Inventory by SKU", "finishedGoodsInventoryBySku"),
    ("Scrap/Wastage Rate", "scrapWastageRate"),
    // Logistics
    ("On-Time Dispatch Rate", "onTimeDispatchRate"),
    ("Fleet Utilization", "fleetUtilization"),
    ("Average Delivery Lead Time", "averageDeliveryLeadTime"),
    (
        "Cold Chain Temperature Breach Instances",
        "coldChainTemperatureBreachInstances",
    ),
    ("Distributor Fill Rate", "distributorFillRate"),
    // Market / sales
    ("Lost Sales Value (Estimated)", "lostSalesValue"),
    ("Sales Return Rate", "salesReturnRate"),
    ("Retailer Service Level", "retailerServiceLevel"),
    ("Competitor Stock Presence in Key Markets", "competitorStockPresence"),
    (
        "Daily Demand Spike Events vs Response Time",
        "dailyDemandSpikeResponseTime",
    ),
];

static SECTION_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SECTION_BY_CATEGORY.iter().copied().collect());

static VIEW_KEY_LOOKUP: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| VIEW_KEY_BY_NAME.iter().copied().collect());

static TABS: &[DashboardTab] = &[
    DashboardTab {
        id: "executive-summary",
        label: "Executive Summary",
    },
    DashboardTab {
        id: "demand-supply",
        label: "Demand ↔ Supply",
    },
    DashboardTab {
        id: "production",
        label: "Production & Inventory",
    },
    DashboardTab {
        id: "logistics",
        label: "Logistics & Distribution",
    },
    DashboardTab {
        id: "market",
        label: "Sales, Revenue & Market",
    },
];

/// KPI section shown on the given dashboard category, if the category is known.
pub fn section_for_category(category: &str) -> Option<&'static str> {
    SECTION_LOOKUP.get(category).copied()
}

/// camelCase key under which a KPI is exposed to the views.
pub fn view_key_for_name(name: &str) -> Option<&'static str> {
    VIEW_KEY_LOOKUP.get(name).copied()
}

pub fn categories() -> impl Iterator<Item = &'static str> {
    SECTION_BY_CATEGORY.iter().map(|(category, _)| *category)
}

pub fn view_keys() -> impl Iterator<Item = &'static str> {
    VIEW_KEY_BY_NAME.iter().map(|(_, key)| *key)
}

pub fn tabs() -> &'static [DashboardTab] {
    TABS
}
