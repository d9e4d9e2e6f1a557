//! Category name-box resolution
//!
//! A category's name comes from its name-box when it has one. Otherwise a
//! name-box is created: a meaningful container name is kept, an automatic
//! one (`Slide3`, empty, ...) is replaced by `Untitled Category <n>`.

use crate::domain::{
    is_default_container_name, name_box_text, sanitize_name, Category, Shape,
    NAME_BOX_SHAPE_NAME,
};

use super::context::ReconcileContext;

/// Makes sure `category` has a name-box and adopts its name
///
/// Returns the index of the name-box among the category's shapes, which is
/// also registered in `ctx` under `category_index`.
pub fn resolve_name_box(
    category: &mut Category,
    category_index: usize,
    ctx: &mut ReconcileContext,
) -> usize {
    if let Some(idx) = category.name_box_index() {
        if let Some(name) = category.shapes[idx].name_box_name() {
            category.name = name.to_string();
        }
        ctx.register_name_box(category_index, idx);
        return idx;
    }

    let name = match sanitize_name(&category.name) {
        Some(name) if !is_default_container_name(&category.name) => name,
        _ => ctx.next_untitled(),
    };

    category.push_shape(Shape::text_box(NAME_BOX_SHAPE_NAME, name_box_text(&name)));
    category.name = name;

    let idx = category.shapes.len() - 1;
    ctx.register_name_box(category_index, idx);
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adopts_existing_name_box() {
        let mut category = Category::bare(
            "Slide2",
            vec![
                Shape::new("Line", Vec::new()),
                Shape::text_box("Title", "Category: Arrows"),
            ],
        );
        let mut ctx = ReconcileContext::new(false);

        let idx = resolve_name_box(&mut category, 0, &mut ctx);

        assert_eq!(idx, 1);
        assert_eq!(category.name, "Arrows");
        assert_eq!(category.shapes.len(), 2);
        assert_eq!(ctx.name_box(0), Some(1));
    }

    #[test]
    fn creates_name_box_from_meaningful_name() {
        let mut category = Category::bare("Flowchart", vec![Shape::new("Box", Vec::new())]);
        let mut ctx = ReconcileContext::new(false);

        let idx = resolve_name_box(&mut category, 0, &mut ctx);

        assert_eq!(category.name, "Flowchart");
        assert_eq!(category.shapes[idx].name, NAME_BOX_SHAPE_NAME);
        assert_eq!(category.shapes[idx].name_box_name(), Some("Flowchart"));
    }

    #[test]
    fn sanitizes_raw_names() {
        let mut category = Category::bare("In/Out", Vec::new());
        let mut ctx = ReconcileContext::new(false);

        resolve_name_box(&mut category, 0, &mut ctx);

        assert_eq!(category.name, "InOut");
    }

    #[test]
    fn default_names_share_one_counter() {
        let mut first = Category::bare("Slide1", Vec::new());
        let mut second = Category::bare("", Vec::new());
        let mut third = Category::bare("Slide 7", Vec::new());
        let mut ctx = ReconcileContext::new(false);

        resolve_name_box(&mut first, 0, &mut ctx);
        resolve_name_box(&mut second, 1, &mut ctx);
        resolve_name_box(&mut third, 2, &mut ctx);

        assert_eq!(first.name, "Untitled Category 1");
        assert_eq!(second.name, "Untitled Category 2");
        assert_eq!(third.name, "Untitled Category 3");
        assert_eq!(ctx.name_boxes().len(), 3);
    }

    #[test]
    fn unusable_raw_name_becomes_untitled() {
        let mut category = Category::bare("???", Vec::new());
        let mut ctx = ReconcileContext::new(false);

        resolve_name_box(&mut category, 0, &mut ctx);

        assert_eq!(category.name, "Untitled Category 1");
    }

    #[test]
    fn resolving_twice_is_stable() {
        let mut category = Category::bare("Slide4", Vec::new());
        let mut ctx = ReconcileContext::new(false);
        resolve_name_box(&mut category, 0, &mut ctx);
        let before = category.clone();

        let mut ctx = ReconcileContext::new(false);
        resolve_name_box(&mut category, 0, &mut ctx);

        assert_eq!(category, before);
    }
}
