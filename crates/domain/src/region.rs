use serde::Serialize;

/// Static catalog entry for an object storage region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Region identifier, for example `eu-west-1`.
    pub id: &'static str,
    /// Human-readable region name.
    pub name: &'static str,
}

const REGIONS: &[Region] = &[
    Region::new("us-east-1", "US East (N. Virginia)"),
    Region::new("us-east-2", "US East (Ohio)"),
    Region::new("us-west-1", "US West (N. California)"),
    Region::new("us-west-2", "US West (Oregon)"),
    Region::new("af-south-1", "Africa (Cape Town)"),
    Region::new("ap-east-1", "Asia Pacific (Hong Kong)"),
    Region::new("ap-south-1", "Asia Pacific (Mumbai)"),
    Region::new("ap-south-2", "Asia Pacific (Hyderabad)"),
    Region::new("ap-northeast-1", "Asia Pacific (Tokyo)"),
    Region::new("ap-northeast-2", "Asia Pacific (Seoul)"),
    Region::new("ap-northeast-3", "Asia Pacific (Osaka)"),
    Region::new("ap-southeast-1", "Asia Pacific (Singapore)"),
    Region::new("ap-southeast-2", "Asia Pacific (Sydney)"),
    Region::new("ap-southeast-3", "Asia Pacific (Jakarta)"),
    Region::new("ap-southeast-4", "Asia Pacific (Melbourne)"),
    Region::new("ca-central-1", "Canada (Central)"),
    Region::new("eu-central-1", "Europe (Frankfurt)"),
    Region::new("eu-central-2", "Europe (Zurich)"),
    Region::new("eu-west-1", "Europe (Ireland)"),
    Region::new("eu-west-2", "Europe (London)"),
    Region::new("eu-west-3", "Europe (Paris)"),
    Region::new("eu-south-1", "Europe (Milan)"),
    Region::new("eu-south-2", "Europe (Spain)"),
    Region::new("eu-north-1", "Europe (Stockholm)"),
    Region::new("me-south-1", "Middle East (Bahrain)"),
    Region::new("me-central-1", "Middle East (UAE)"),
    Region::new("sa-east-1", "South America (São Paulo)"),
];

impl Region {
    const fn new(id: &'static str, name: &'static str) -> Self {
        Self { id, name }
    }

    /// Returns all known regions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        REGIONS
    }

    /// Finds a region by identifier.
    #[must_use]
    pub fn find(id: &str) -> Option<Self> {
        REGIONS.iter().copied().find(|region| region.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::Region;

    #[test]
    fn region_ids_are_unique() {
        let mut ids: Vec<&str> = Region::all().iter().map(|region| region.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), Region::all().len());
    }

    #[test]
    fn find_returns_display_name() {
        assert_eq!(
            Region::find("eu-central-1").map(|region| region.name),
            Some("Europe (Frankfurt)")
        );
        assert_eq!(Region::find("mars-1"), None);
    }
}
