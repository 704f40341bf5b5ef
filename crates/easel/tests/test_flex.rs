//! Integration tests for the flex layout algorithm.

#[cfg(test)]
mod tests {
    use easel::{
        Length, Result,
        geom::{Point, Size},
        testing::Harness,
        widgets::{Container, CrossAxisAlignment, Flex, FlexItem, MainAxisAlignment},
    };

    #[test]
    fn space_between_places_two_fixed_children() -> Result<()> {
        let mut h = Harness::new(Size::new(300.0, 100.0));
        let root = h.root();
        let row = h.add_under(
            root,
            Flex::row()
                .width(Length::Stretch)
                .main_align(MainAxisAlignment::SpaceBetween),
        )?;
        let a = h.add_under(
            row,
            Container::new().width(Length::Px(100.0)).height(Length::Px(10.0)),
        )?;
        let b = h.add_under(
            row,
            Container::new().width(Length::Px(100.0)).height(Length::Px(10.0)),
        )?;
        h.step()?;

        assert_eq!(h.scene().position(a)?, Point::zero());
        assert_eq!(h.scene().position(b)?, Point::new(200.0, 0.0));
        Ok(())
    }

    #[test]
    fn space_between_with_one_child_degenerates_to_start() -> Result<()> {
        let mut h = Harness::new(Size::new(300.0, 100.0));
        let root = h.root();
        let row = h.add_under(
            root,
            Flex::row()
                .width(Length::Stretch)
                .main_align(MainAxisAlignment::SpaceBetween),
        )?;
        let only = h.add_under(
            row,
            Container::new().width(Length::Px(100.0)).height(Length::Px(10.0)),
        )?;
        h.step()?;

        // One child means no between-spacing to divide; the position must
        // be the leading edge, never NaN.
        let p = h.scene().position(only)?;
        assert_eq!(p, Point::zero());
        assert!(p.x.is_finite());
        Ok(())
    }

    #[test]
    fn fixed_shrink_and_flex_children_share_the_bound() -> Result<()> {
        let mut h = Harness::new(Size::new(200.0, 100.0));
        let root = h.root();
        let row = h.add_under(root, Flex::row().width(Length::Stretch))?;

        let fixed = h.add_under(
            row,
            Container::new().width(Length::Px(50.0)).height(Length::Px(20.0)),
        )?;
        let wrapper = h.add_under(row, Container::new())?;
        let _wrapped = h.add_under(
            wrapper,
            Container::new().width(Length::Px(30.0)).height(Length::Px(20.0)),
        )?;
        let flexed = h.add_under(row, FlexItem::new(1))?;
        let _stretchy = h.add_under(
            flexed,
            Container::new().width(Length::Stretch).height(Length::Px(20.0)),
        )?;
        h.step()?;

        assert_eq!(h.scene().intrinsic(fixed)?.w, 50.0);
        assert_eq!(h.scene().intrinsic(wrapper)?.w, 30.0);
        assert_eq!(h.scene().intrinsic(flexed)?.w, 120.0);

        assert_eq!(h.scene().position(fixed)?.x, 0.0);
        assert_eq!(h.scene().position(wrapper)?.x, 50.0);
        assert_eq!(h.scene().position(flexed)?.x, 80.0);

        assert_eq!(h.scene().intrinsic(row)?.w, 200.0);
        Ok(())
    }

    #[test]
    fn flex_factors_split_free_length_proportionally() -> Result<()> {
        let mut h = Harness::new(Size::new(300.0, 100.0));
        let root = h.root();
        let row = h.add_under(root, Flex::row().width(Length::Stretch))?;
        let one = h.add_under(row, FlexItem::new(1))?;
        let _a = h.add_under(
            one,
            Container::new().width(Length::Stretch).height(Length::Px(10.0)),
        )?;
        let two = h.add_under(row, FlexItem::new(2))?;
        let _b = h.add_under(
            two,
            Container::new().width(Length::Stretch).height(Length::Px(10.0)),
        )?;
        h.step()?;

        assert_eq!(h.scene().intrinsic(one)?.w, 100.0);
        assert_eq!(h.scene().intrinsic(two)?.w, 200.0);
        Ok(())
    }

    #[test]
    fn children_never_exceed_the_reported_main_length() -> Result<()> {
        let mut h = Harness::new(Size::new(200.0, 100.0));
        let root = h.root();
        let row = h.add_under(root, Flex::row().width(Length::Stretch))?;
        let mut children = Vec::new();
        children.push(h.add_under(
            row,
            Container::new().width(Length::Px(80.0)).height(Length::Px(10.0)),
        )?);
        children.push(h.add_under(
            row,
            Container::new().width(Length::Px(90.0)).height(Length::Px(10.0)),
        )?);
        let item = h.add_under(row, FlexItem::new(3))?;
        children.push(item);
        let _fill = h.add_under(
            item,
            Container::new().width(Length::Stretch).height(Length::Px(10.0)),
        )?;
        h.step()?;

        let total: f64 = children
            .iter()
            .map(|&c| h.scene().intrinsic(c).map(|s| s.w))
            .collect::<Result<Vec<f64>>>()?
            .iter()
            .sum();
        let row_len = h.scene().intrinsic(row)?.w;
        assert!(total <= row_len + 1e-9, "children {total} exceed row {row_len}");
        Ok(())
    }

    #[test]
    fn shrink_main_axis_offers_flex_children_nothing() -> Result<()> {
        let mut h = Harness::new(Size::new(200.0, 100.0));
        let root = h.root();
        // Shrink-sized flex: flex distribution needs an imposed bound.
        let row = h.add_under(root, Flex::row())?;
        let fixed = h.add_under(
            row,
            Container::new().width(Length::Px(40.0)).height(Length::Px(10.0)),
        )?;
        let item = h.add_under(row, FlexItem::new(1))?;
        let _fill = h.add_under(
            item,
            Container::new().width(Length::Stretch).height(Length::Px(10.0)),
        )?;
        h.step()?;

        assert_eq!(h.scene().intrinsic(fixed)?.w, 40.0);
        assert_eq!(h.scene().intrinsic(item)?.w, 0.0);
        assert_eq!(h.scene().intrinsic(row)?.w, 40.0);
        Ok(())
    }

    #[test]
    fn stretch_children_fill_the_declared_cross_length() -> Result<()> {
        let mut h = Harness::new(Size::new(300.0, 100.0));
        let root = h.root();
        // The row pins its own height; stretch children fill that, not the
        // incoming viewport bound.
        let row = h.add_under(
            root,
            Flex::row()
                .width(Length::Stretch)
                .height(Length::Px(30.0))
                .cross_align(CrossAxisAlignment::Stretch),
        )?;
        let child = h.add_under(
            row,
            Container::new().width(Length::Px(40.0)).height(Length::Stretch),
        )?;
        h.step()?;

        assert_eq!(h.scene().intrinsic(row)?.h, 30.0);
        assert_eq!(h.scene().intrinsic(child)?.h, 30.0);
        Ok(())
    }

    #[test]
    fn cross_alignment_centers_and_ends() -> Result<()> {
        let mut h = Harness::new(Size::new(300.0, 100.0));
        let root = h.root();
        let row = h.add_under(
            root,
            Flex::row()
                .width(Length::Stretch)
                .height(Length::Stretch)
                .cross_align(CrossAxisAlignment::Center),
        )?;
        let child = h.add_under(
            row,
            Container::new().width(Length::Px(40.0)).height(Length::Px(20.0)),
        )?;
        h.step()?;

        assert_eq!(h.scene().position(child)?, Point::new(0.0, 40.0));
        Ok(())
    }

    #[test]
    fn column_direction_uses_the_vertical_main_axis() -> Result<()> {
        let mut h = Harness::new(Size::new(100.0, 300.0));
        let root = h.root();
        let column = h.add_under(
            root,
            Flex::column()
                .height(Length::Stretch)
                .main_align(MainAxisAlignment::SpaceEvenly),
        )?;
        let a = h.add_under(
            column,
            Container::new().width(Length::Px(10.0)).height(Length::Px(60.0)),
        )?;
        let b = h.add_under(
            column,
            Container::new().width(Length::Px(10.0)).height(Length::Px(60.0)),
        )?;
        h.step()?;

        // 180 free over three gaps of 60.
        assert_eq!(h.scene().position(a)?, Point::new(0.0, 60.0));
        assert_eq!(h.scene().position(b)?, Point::new(0.0, 180.0));
        Ok(())
    }
}
