//! CSS generation for sheet regions.

use crate::sheet::LayoutDescriptor;

/// Render one CSS rule per descriptor, in order.
///
/// Class names are derived from each region's horizontal offset, which is
/// unique per sheet (offsets strictly increase left to right). The horizontal
/// background shift is the negated offset: moving the visible window right
/// over a fixed sheet means sliding the background left.
pub fn render_stylesheet(slots: &[LayoutDescriptor], sheet_ref: &str) -> String {
    let mut css = String::new();
    for slot in slots {
        css.push_str(&format!(
            ".sprite-{} {{ background: url({}) -{}px 0; width: {}px; height: {}px; }}\n",
            slot.offset_x, sheet_ref, slot.offset_x, slot.width, slot.height
        ));
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(offset_x: u32, width: u32, height: u32) -> LayoutDescriptor {
        LayoutDescriptor {
            offset_x,
            width,
            height,
        }
    }

    #[test]
    fn renders_one_rule_per_descriptor_in_order() {
        let css = render_stylesheet(
            &[slot(0, 10, 20), slot(10, 30, 5), slot(25, 15, 40)],
            "sprite.png",
        );
        let expected = "\
.sprite-0 { background: url(sprite.png) -0px 0; width: 10px; height: 20px; }\n\
.sprite-10 { background: url(sprite.png) -10px 0; width: 30px; height: 5px; }\n\
.sprite-25 { background: url(sprite.png) -25px 0; width: 15px; height: 40px; }\n";
        assert_eq!(css, expected);
    }

    #[test]
    fn sheet_ref_lands_in_every_rule() {
        let css = render_stylesheet(&[slot(0, 1, 1)], "/sprites/sprite-123.png");
        assert!(css.contains("url(/sprites/sprite-123.png)"));
    }

    #[test]
    fn empty_slot_list_renders_nothing() {
        assert_eq!(render_stylesheet(&[], "sprite.png"), "");
    }
}
