pub struct Icons;

impl Icons {
    pub const CARD: &str = "🃏";
    pub const FOLDER: &str = "📁";
    pub const PACKAGE: &str = "📦";
    pub const STATS: &str = "📊";
    pub const CHECK: &str = "✅";
    pub const EMPTY: &str = "∅";
}
