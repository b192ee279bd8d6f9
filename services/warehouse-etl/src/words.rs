//! 生成名称用的词表

pub const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Carlos", "Chen", "Diana", "Edsger", "Fatima", "Grace", "Hiro",
    "Ingrid", "James", "Kenji", "Linus", "Margaret", "Nadia", "Omar", "Priya", "Rosa", "Tomas",
];

pub const LAST_NAMES: &[&str] = &[
    "Anderson", "Brown", "Castillo", "Dubois", "Evans", "Fischer", "Garcia", "Hopper", "Ito",
    "Johnson", "Kowalski", "Lovelace", "Martin", "Nakamura", "Okafor", "Petrov", "Quinn",
    "Rossi", "Silva", "Turing",
];

pub const STREETS: &[&str] = &[
    "Maple", "Oak", "Cedar", "Elm", "Pine", "Lake", "Hill", "Park", "River", "Sunset",
];

pub const CITIES: &[&str] = &[
    "Springfield", "Riverside", "Fairview", "Madison", "Georgetown", "Franklin", "Clinton",
    "Salem", "Ashland", "Bristol", "Dover", "Oxford",
];

pub const COMPANY_SUFFIXES: &[&str] = &["Market", "Outlet", "Store", "Supply", "Traders", "Mart"];

pub const PRODUCT_NAMES: &[&str] = &[
    "Widget", "Gizmo", "Gadget", "Lamp", "Kettle", "Backpack", "Notebook", "Headphones",
    "Blender", "Jacket", "Sneakers", "Monitor", "Keyboard", "Umbrella", "Bottle", "Chair",
];

pub const CATEGORIES: &[&str] = &[
    "Electronics", "Home", "Kitchen", "Apparel", "Office", "Outdoor", "Toys", "Sports",
];

pub const SUBCATEGORIES: &[&str] = &[
    "Accessories", "Appliances", "Basics", "Deluxe", "Essentials", "Premium", "Seasonal",
    "Travel",
];

pub const ADJECTIVES: &[&str] = &[
    "durable", "compact", "lightweight", "classic", "modern", "reliable", "versatile", "sturdy",
];
