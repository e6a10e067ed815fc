use voxa_blocks::{BlockType, HOTBAR};

/// Gate for player placement.
pub trait Inventory {
    fn selected(&self) -> BlockType;
    /// Takes one `kind` out of the inventory. Placement only proceeds on `true`.
    fn consume(&mut self, kind: BlockType) -> bool;
}

/// Unlimited supply of every hotbar type.
#[derive(Clone, Debug, Default)]
pub struct CreativeInventory {
    selected: BlockType,
}

impl CreativeInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks hotbar slot `slot` (1-based). Out-of-range slots are ignored.
    pub fn select_slot(&mut self, slot: usize) -> bool {
        match slot.checked_sub(1).and_then(|i| HOTBAR.get(i)) {
            Some(&kind) => {
                self.selected = kind;
                true
            }
            None => false,
        }
    }

    /// Picks `kind` if it is on the hotbar.
    pub fn select(&mut self, kind: BlockType) -> bool {
        if !HOTBAR.contains(&kind) {
            return false;
        }
        self.selected = kind;
        true
    }
}

impl Inventory for CreativeInventory {
    #[inline]
    fn selected(&self) -> BlockType {
        self.selected
    }

    #[inline]
    fn consume(&mut self, _kind: BlockType) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_dirt_and_selects_by_slot() {
        let mut inv = CreativeInventory::new();
        assert_eq!(inv.selected(), BlockType::Dirt);
        assert!(inv.select_slot(1));
        assert_eq!(inv.selected(), BlockType::Grass);
        assert!(inv.select_slot(7));
        assert_eq!(inv.selected(), BlockType::Water);
        assert!(!inv.select_slot(0));
        assert!(!inv.select_slot(8));
        assert_eq!(inv.selected(), BlockType::Water);
    }

    #[test]
    fn bedrock_is_not_selectable() {
        let mut inv = CreativeInventory::new();
        assert!(!inv.select(BlockType::Bedrock));
        assert!(inv.select(BlockType::Leaves));
        assert!(inv.consume(BlockType::Bedrock));
    }
}
