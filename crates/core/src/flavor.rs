//! The flavor wheel: a fixed hierarchy of tasting descriptors.
//!
//! Node ids are dot paths (`fruity.berry.strawberry`). They are globally
//! unique and are the only stable handle stored elsewhere, e.g. in
//! persisted flavor tag blobs.

use serde::Serialize;

/// A node of the flavor wheel. Leaves have no children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FlavorNode {
    /// Dot-path id
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Child nodes in declaration order
    pub children: &'static [FlavorNode],
}

impl FlavorNode {
    /// Whether this node is a leaf descriptor.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

macro_rules! leaf {
    ($id:literal, $name:literal) => {
        FlavorNode { id: $id, name: $name, children: &[] }
    };
}

macro_rules! branch {
    ($id:literal, $name:literal, [$($child:expr),* $(,)?]) => {
        FlavorNode { id: $id, name: $name, children: &[$($child),*] }
    };
}

// SCA flavor wheel, 2016 revision.
static WHEEL: &[FlavorNode] = &[
    // Floral
    branch!("floral", "Floral", [
        branch!("floral.floral", "Floral", [
            leaf!("floral.floral.jasmine", "Jasmine"),
            leaf!("floral.floral.rose", "Rose"),
            leaf!("floral.floral.chamomile", "Chamomile"),
        ]),
        branch!("floral.tea-like", "Tea-like", [
            leaf!("floral.tea-like.black-tea", "Black Tea"),
            leaf!("floral.tea-like.green-tea", "Green Tea"),
        ]),
    ]),

    // Fruity
    branch!("fruity", "Fruity", [
        branch!("fruity.berry", "Berry", [
            leaf!("fruity.berry.strawberry", "Strawberry"),
            leaf!("fruity.berry.raspberry", "Raspberry"),
            leaf!("fruity.berry.blueberry", "Blueberry"),
            leaf!("fruity.berry.blackberry", "Blackberry"),
        ]),
        branch!("fruity.dried-fruit", "Dried Fruit", [
            leaf!("fruity.dried-fruit.raisin", "Raisin"),
            leaf!("fruity.dried-fruit.prune", "Prune"),
            leaf!("fruity.dried-fruit.coconut", "Coconut"),
        ]),
        branch!("fruity.citrus", "Citrus", [
            leaf!("fruity.citrus.grapefruit", "Grapefruit"),
            leaf!("fruity.citrus.orange", "Orange"),
            leaf!("fruity.citrus.lemon", "Lemon"),
            leaf!("fruity.citrus.lime", "Lime"),
        ]),
        branch!("fruity.other-fruit", "Other Fruit", [
            leaf!("fruity.other-fruit.cherry", "Cherry"),
            leaf!("fruity.other-fruit.pomegranate", "Pomegranate"),
            leaf!("fruity.other-fruit.pineapple", "Pineapple"),
            leaf!("fruity.other-fruit.grape", "Grape"),
            leaf!("fruity.other-fruit.apple", "Apple"),
            leaf!("fruity.other-fruit.peach", "Peach"),
            leaf!("fruity.other-fruit.pear", "Pear"),
        ]),
    ]),

    // Sour/Fermented
    branch!("sour-fermented", "Sour/Fermented", [
        branch!("sour-fermented.sour", "Sour", [
            leaf!("sour-fermented.sour.acetic-acid", "Acetic Acid"),
            leaf!("sour-fermented.sour.butyric-acid", "Butyric Acid"),
            leaf!("sour-fermented.sour.citric-acid", "Citric Acid"),
            leaf!("sour-fermented.sour.malic-acid", "Malic Acid"),
        ]),
        branch!("sour-fermented.fermented", "Fermented", [
            leaf!("sour-fermented.fermented.winey", "Winey"),
            leaf!("sour-fermented.fermented.whiskey", "Whiskey"),
            leaf!("sour-fermented.fermented.overripe", "Overripe"),
        ]),
    ]),

    // Green/Vegetative
    branch!("green-vegetative", "Green/Vegetative", [
        leaf!("green-vegetative.olive-oil", "Olive Oil"),
        branch!("green-vegetative.raw", "Raw", [
            leaf!("green-vegetative.raw.under-ripe", "Under-ripe"),
            leaf!("green-vegetative.raw.peapod", "Peapod"),
            leaf!("green-vegetative.raw.fresh", "Fresh"),
        ]),
        branch!("green-vegetative.vegetative", "Vegetative", [
            leaf!("green-vegetative.vegetative.dark-green", "Dark Green"),
            leaf!("green-vegetative.vegetative.hay-like", "Hay-like"),
            leaf!("green-vegetative.vegetative.herb-like", "Herb-like"),
        ]),
    ]),

    // Other
    branch!("other", "Other", [
        branch!("other.papery-musty", "Papery/Musty", [
            leaf!("other.papery-musty.stale", "Stale"),
            leaf!("other.papery-musty.cardboard", "Cardboard"),
            leaf!("other.papery-musty.papery", "Papery"),
            leaf!("other.papery-musty.woody", "Woody"),
            leaf!("other.papery-musty.musty-dusty", "Musty/Dusty"),
            leaf!("other.papery-musty.musty-earthy", "Musty/Earthy"),
            leaf!("other.papery-musty.animalic", "Animalic"),
            leaf!("other.papery-musty.meaty-brothy", "Meaty/Brothy"),
        ]),
        branch!("other.chemical", "Chemical", [
            leaf!("other.chemical.phenolic", "Phenolic"),
            leaf!("other.chemical.bitter", "Bitter"),
            leaf!("other.chemical.salty", "Salty"),
            leaf!("other.chemical.medicinal", "Medicinal"),
            leaf!("other.chemical.petroleum", "Petroleum"),
            leaf!("other.chemical.skunky", "Skunky"),
            leaf!("other.chemical.rubber", "Rubber"),
        ]),
    ]),

    // Roasted
    branch!("roasted", "Roasted", [
        leaf!("roasted.pipe-tobacco", "Pipe Tobacco"),
        branch!("roasted.cereal", "Cereal", [
            leaf!("roasted.cereal.grain", "Grain"),
            leaf!("roasted.cereal.malt", "Malt"),
        ]),
        branch!("roasted.burnt", "Burnt", [
            leaf!("roasted.burnt.smoky", "Smoky"),
            leaf!("roasted.burnt.ashy", "Ashy"),
            leaf!("roasted.burnt.acrid", "Acrid"),
            leaf!("roasted.burnt.brown-roast", "Brown Roast"),
        ]),
    ]),

    // Spices
    branch!("spices", "Spices", [
        branch!("spices.pungent", "Pungent", [
            leaf!("spices.pungent.pepper", "Pepper"),
        ]),
        branch!("spices.brown-spice", "Brown Spice", [
            leaf!("spices.brown-spice.anise", "Anise"),
            leaf!("spices.brown-spice.nutmeg", "Nutmeg"),
            leaf!("spices.brown-spice.cinnamon", "Cinnamon"),
            leaf!("spices.brown-spice.clove", "Clove"),
        ]),
    ]),

    // Nutty/Cocoa
    branch!("nutty-cocoa", "Nutty/Cocoa", [
        branch!("nutty-cocoa.nutty", "Nutty", [
            leaf!("nutty-cocoa.nutty.peanuts", "Peanuts"),
            leaf!("nutty-cocoa.nutty.hazelnut", "Hazelnut"),
            leaf!("nutty-cocoa.nutty.almond", "Almond"),
        ]),
        branch!("nutty-cocoa.cocoa", "Cocoa", [
            leaf!("nutty-cocoa.cocoa.dark-chocolate", "Dark Chocolate"),
            leaf!("nutty-cocoa.cocoa.chocolate", "Chocolate"),
        ]),
    ]),

    // Sweet
    branch!("sweet", "Sweet", [
        branch!("sweet.brown-sugar", "Brown Sugar", [
            leaf!("sweet.brown-sugar.molasses", "Molasses"),
            leaf!("sweet.brown-sugar.maple-syrup", "Maple Syrup"),
            leaf!("sweet.brown-sugar.brown-sugar", "Brown Sugar"),
            leaf!("sweet.brown-sugar.honey", "Honey"),
            leaf!("sweet.brown-sugar.caramelized", "Caramelized"),
        ]),
        branch!("sweet.vanilla", "Vanilla", [
            leaf!("sweet.vanilla.vanilla", "Vanilla"),
            leaf!("sweet.vanilla.vanillin", "Vanillin"),
        ]),
        branch!("sweet.overall-sweet", "Overall Sweet", [
            leaf!("sweet.overall-sweet.sweet-aromatics", "Sweet Aromatics"),
        ]),
    ]),
];

/// Read access to the flavor wheel.
pub struct FlavorTaxonomy;

impl FlavorTaxonomy {
    /// Top-level categories in declaration order.
    pub fn roots() -> &'static [FlavorNode] {
        WHEEL
    }

    /// All leaf descriptors, pre-order depth-first.
    ///
    /// Every call starts a fresh traversal.
    pub fn flatten_leaves() -> Leaves {
        Leaves {
            stack: vec![WHEEL.iter()],
        }
    }

    /// Find a node (leaf or not) by its id.
    pub fn find_by_id(id: &str) -> Option<&'static FlavorNode> {
        fn search(nodes: &'static [FlavorNode], id: &str) -> Option<&'static FlavorNode> {
            for node in nodes {
                if node.id == id {
                    return Some(node);
                }
                if let Some(found) = search(node.children, id) {
                    return Some(found);
                }
            }
            None
        }
        search(WHEEL, id)
    }

    /// Position of a leaf in declaration order.
    pub fn leaf_index(id: &str) -> Option<usize> {
        Self::flatten_leaves().position(|leaf| leaf.id == id)
    }
}

/// Depth-first iterator over the leaves of the wheel.
pub struct Leaves {
    stack: Vec<std::slice::Iter<'static, FlavorNode>>,
}

impl Iterator for Leaves {
    type Item = &'static FlavorNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(node) if node.is_leaf() => return Some(node),
                Some(node) => self.stack.push(node.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn collect_ids(nodes: &[FlavorNode], out: &mut Vec<&'static str>) {
        for node in nodes {
            out.push(node.id);
            collect_ids(node.children, out);
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids = Vec::new();
        collect_ids(FlavorTaxonomy::roots(), &mut ids);
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        assert!(ids.len() > 100);
    }

    #[test]
    fn test_flatten_leaves_only_yields_leaves() {
        let leaves: Vec<_> = FlavorTaxonomy::flatten_leaves().collect();
        assert!(leaves.iter().all(|l| l.is_leaf()));
        assert_eq!(leaves.first().map(|l| l.id), Some("floral.floral.jasmine"));
        assert_eq!(
            leaves.last().map(|l| l.id),
            Some("sweet.overall-sweet.sweet-aromatics")
        );
    }

    #[test]
    fn test_flatten_leaves_is_restartable() {
        let first: Vec<_> = FlavorTaxonomy::flatten_leaves().map(|l| l.id).collect();
        let second: Vec<_> = FlavorTaxonomy::flatten_leaves().map(|l| l.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_leaf_directly_under_category() {
        // Olive Oil hangs off the category without a subcategory
        let leaves: Vec<_> = FlavorTaxonomy::flatten_leaves().map(|l| l.id).collect();
        assert!(leaves.contains(&"green-vegetative.olive-oil"));
        assert!(!leaves.contains(&"green-vegetative.raw"));
    }

    #[test]
    fn test_find_by_id() {
        let node = FlavorTaxonomy::find_by_id("fruity.berry.strawberry").unwrap();
        assert_eq!(node.name, "Strawberry");

        let branch = FlavorTaxonomy::find_by_id("nutty-cocoa.cocoa").unwrap();
        assert_eq!(branch.children.len(), 2);

        assert!(FlavorTaxonomy::find_by_id("fruity.berry.durian").is_none());
    }

    #[test]
    fn test_leaf_index_follows_declaration_order() {
        let jasmine = FlavorTaxonomy::leaf_index("floral.floral.jasmine").unwrap();
        let rose = FlavorTaxonomy::leaf_index("floral.floral.rose").unwrap();
        assert_eq!(jasmine, 0);
        assert!(rose > jasmine);
        assert_eq!(FlavorTaxonomy::leaf_index("floral"), None);
    }
}
