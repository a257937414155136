#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::*;

    type Log = Rc<RefCell<Vec<String>>>;
    type Handler = Box<dyn FnMut(&mut EventCx<'_>, &mut InputEvent)>;

    /// Fixed-size view that logs every event it sees. Children are laid out
    /// at their own preferred size and keep whatever position the test gave
    /// them.
    struct Recorder {
        label: &'static str,
        size: Option<Size>,
        log: Log,
        receive: bool,
        clip: bool,
        handler: Option<Handler>,
    }

    impl Recorder {
        fn new(label: &'static str, w: f32, h: f32, log: &Log) -> Self {
            Self {
                label,
                size: Some(Size::new(w, h)),
                log: log.clone(),
                receive: true,
                clip: false,
                handler: None,
            }
        }

        fn fill(label: &'static str, log: &Log) -> Self {
            Self {
                size: None,
                ..Self::new(label, 0.0, 0.0, log)
            }
        }

        fn transparent(mut self) -> Self {
            self.receive = false;
            self
        }

        fn clipping(mut self) -> Self {
            self.clip = true;
            self
        }

        fn on_input(
            mut self,
            f: impl FnMut(&mut EventCx<'_>, &mut InputEvent) + 'static,
        ) -> Self {
            self.handler = Some(Box::new(f));
            self
        }
    }

    impl View for Recorder {
        fn layout(&mut self, cx: &mut LayoutCx<'_>, available: Size) -> Size {
            let own = self.size.unwrap_or(available);
            for child in cx.children() {
                cx.layout_child(child, own);
            }
            own
        }

        fn draw(&self, cx: &mut DrawCx<'_>) {
            cx.fill_text(self.label, Point::ZERO, Color::BLACK);
        }

        fn input(&mut self, cx: &mut EventCx<'_>, event: &mut InputEvent) {
            let entry = match event.position() {
                Some(p) => format!("{}:{}@{},{}", self.label, event.type_name(), p.x, p.y),
                None => format!("{}:{}", self.label, event.type_name()),
            };
            self.log.borrow_mut().push(entry);
            if let Some(h) = self.handler.as_mut() {
                h(cx, event);
            }
        }

        fn clip_children(&self) -> bool {
            self.clip
        }

        fn can_receive_mouse(&self, _has_children: bool) -> bool {
            self.receive
        }

        fn kind(&self) -> &'static str {
            self.label
        }
    }

    struct Other;

    impl View for Other {
        fn layout(&mut self, _cx: &mut LayoutCx<'_>, _available: Size) -> Size {
            Size::ZERO
        }
    }

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn entries(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    fn surface() -> Surface<SceneCanvas> {
        let _ = env_logger::builder().is_test(true).try_init();
        Surface::new(SurfaceConfig::new(300.0, 300.0), SceneCanvas::new())
    }

    fn down(s: &mut Surface<SceneCanvas>, x: f32, y: f32) -> Dispatched {
        s.pointer_down(Point::new(x, y), PointerButton::Primary, Modifiers::empty())
    }

    fn drag(s: &mut Surface<SceneCanvas>, x: f32, y: f32) -> Dispatched {
        s.pointer_move(Point::new(x, y), Modifiers::empty())
    }

    fn up(s: &mut Surface<SceneCanvas>, x: f32, y: f32) -> Dispatched {
        s.pointer_up(Point::new(x, y), PointerButton::Primary, Modifiers::empty())
    }

    fn place(s: &mut Surface<SceneCanvas>, id: ViewId, x: f32, y: f32) {
        s.set_position(id, Point::new(x, y)).unwrap();
    }

    /// Root with overlapping siblings A (0,0,100,100) and B (50,50,100,100).
    fn overlapping(log: &Log) -> (Surface<SceneCanvas>, ViewId, ViewId, ViewId) {
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", log));
        let a = s.add_child(root, Recorder::new("A", 100.0, 100.0, log)).unwrap();
        let b = s.add_child(root, Recorder::new("B", 100.0, 100.0, log)).unwrap();
        place(&mut s, b, 50.0, 50.0);
        s.repaint();
        (s, root, a, b)
    }

    #[test]
    fn geometry_helpers() {
        assert_eq!(Size::new(10.0, 4.0).shrink(3.0), Size::new(4.0, 0.0));
        assert_eq!(Size::new(10.0, 4.0).grow(1.0), Size::new(12.0, 6.0));
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert_eq!(
            r.intersect(Rect::new(5.0, 5.0, 10.0, 10.0)),
            Some(Rect::new(5.0, 5.0, 5.0, 5.0))
        );
        assert_eq!(r.intersect(Rect::new(10.0, 0.0, 5.0, 5.0)), None);
        assert_eq!(Point::new(5.0, 5.0).translate(2.0, 3.0), Point::new(3.0, 2.0));
    }

    #[test]
    fn color_from_hex() {
        assert_eq!(Color::from_hex("#ff8000"), Color(255, 128, 0, 255));
        assert_eq!(Color::from_hex("10203040"), Color(16, 32, 48, 64));
        assert_eq!(Color::from_hex("nope"), Color::BLACK);
    }

    #[test]
    fn key_names() {
        assert_eq!(Key::from_name("a"), Key::Character('a'));
        assert_eq!(Key::from_name("Enter"), Key::Enter);
        assert_eq!(Key::from_name("F5"), Key::F(5));
        assert_eq!(Key::from_name("Shift"), Key::Unidentified("Shift".into()));
    }

    #[test]
    fn topmost_sibling_wins() {
        let log = log();
        let (mut s, _, _, b) = overlapping(&log);
        let out = down(&mut s, 75.0, 75.0);
        assert_eq!(out.target, Some(b));
        assert_eq!(entries(&log), vec!["B:pointer-down@25,25"]);
    }

    #[test]
    fn earlier_sibling_is_hit_outside_the_overlap() {
        let log = log();
        let (mut s, _, a, _) = overlapping(&log);
        assert_eq!(down(&mut s, 20.0, 20.0).target, Some(a));
    }

    #[test]
    fn invisible_views_are_skipped() {
        let log = log();
        let (mut s, _, a, b) = overlapping(&log);
        s.set_visible(b, false).unwrap();
        assert_eq!(down(&mut s, 75.0, 75.0).target, Some(a));
    }

    #[test]
    fn transparent_container_falls_through_to_sibling() {
        let log = log();
        let (mut s, root, a, _) = overlapping(&log);
        let layer = s
            .add_child(root, Recorder::fill("layer", &log).transparent())
            .unwrap();
        s.repaint();
        // The layer covers everything but has no hit child and can't take the
        // pointer, so B (under it) is the hit.
        assert_ne!(down(&mut s, 75.0, 75.0).target, Some(layer));
        up(&mut s, 75.0, 75.0);
        assert_eq!(down(&mut s, 20.0, 20.0).target, Some(a));
    }

    #[test]
    fn root_is_not_part_of_the_path() {
        let log = log();
        let (mut s, _, _, _) = overlapping(&log);
        let out = down(&mut s, 250.0, 10.0);
        assert_eq!(out.target, None);
        assert_eq!(out.delivered, 0);
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn path_runs_outer_to_inner_in_local_coordinates() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let p = s.add_child(root, Recorder::new("P", 200.0, 200.0, &log)).unwrap();
        let c = s.add_child(p, Recorder::new("C", 50.0, 50.0, &log)).unwrap();
        place(&mut s, p, 10.0, 10.0);
        place(&mut s, c, 5.0, 5.0);
        s.repaint();

        let out = down(&mut s, 20.0, 20.0);
        assert_eq!(out.target, Some(c));
        assert_eq!(out.delivered, 2);
        assert_eq!(
            entries(&log),
            vec!["P:pointer-down@10,10", "C:pointer-down@5,5"]
        );
    }

    #[test]
    fn pointer_capture_survives_leaving_every_view() {
        let log = log();
        let (mut s, _, a, _) = overlapping(&log);
        down(&mut s, 10.0, 10.0);
        let out = drag(&mut s, 500.0, 400.0);
        assert_eq!(out.target, Some(a));
        up(&mut s, 600.0, 600.0);
        assert_eq!(
            entries(&log),
            vec![
                "A:pointer-down@10,10",
                "A:pointer-drag@500,400",
                "A:pointer-up@600,600",
            ]
        );
        assert!(s.pointer_state().is_idle());
    }

    #[test]
    fn drag_carries_delta_from_previous_point() {
        let log = log();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let sink = seen.clone();
        s.add_child(
            root,
            Recorder::new("A", 100.0, 100.0, &log).on_input(move |_cx, e| {
                if let Some(d) = e.pointer().and_then(|p| p.delta) {
                    sink.borrow_mut().push(d);
                }
            }),
        )
        .unwrap();
        s.repaint();
        down(&mut s, 10.0, 10.0);
        drag(&mut s, 15.0, 12.0);
        drag(&mut s, 5.0, 12.0);
        assert_eq!(
            *seen.borrow(),
            vec![Point::new(5.0, 2.0), Point::new(-10.0, 0.0)]
        );
    }

    #[test]
    fn every_event_of_a_gesture_reports_the_pressed_button() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let buttons = Rc::new(RefCell::new(Vec::new()));
        let seen = buttons.clone();
        s.add_child(
            root,
            Recorder::new("A", 100.0, 100.0, &log).on_input(move |_cx, e| {
                if let Some(p) = e.pointer() {
                    seen.borrow_mut().push(p.button);
                }
            }),
        )
        .unwrap();
        s.repaint();

        let none = Modifiers::empty();
        s.pointer_down(Point::new(10.0, 10.0), PointerButton::Secondary, none);
        assert_eq!(s.pointer_state().button(), Some(PointerButton::Secondary));
        s.pointer_move(Point::new(20.0, 20.0), none);
        s.pointer_move(Point::new(30.0, 30.0), none);
        s.pointer_up(Point::new(30.0, 30.0), PointerButton::Secondary, none);

        assert_eq!(*buttons.borrow(), vec![PointerButton::Secondary; 4]);
        assert_eq!(s.pointer_state().button(), None);
    }

    #[test]
    fn second_press_releases_the_unfinished_gesture() {
        let log = log();
        let (mut s, _, _, b) = overlapping(&log);
        down(&mut s, 10.0, 10.0);
        let out = down(&mut s, 75.0, 75.0);
        assert_eq!(out.target, Some(b));
        up(&mut s, 75.0, 75.0);
        assert_eq!(
            entries(&log),
            vec![
                "A:pointer-down@10,10",
                "A:pointer-up@75,75",
                "B:pointer-down@25,25",
                "B:pointer-up@25,25",
            ]
        );
    }

    #[test]
    fn moves_without_a_press_are_ignored() {
        let log = log();
        let (mut s, _, _, _) = overlapping(&log);
        assert_eq!(drag(&mut s, 10.0, 10.0), Dispatched::default());
        assert_eq!(up(&mut s, 10.0, 10.0), Dispatched::default());
        assert!(entries(&log).is_empty());
    }

    #[test]
    fn stop_halts_descendants_but_not_ancestors() {
        let log = log();
        let observed = Rc::new(RefCell::new(Vec::new()));
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let p = s
            .add_child(root, Recorder::new("P", 200.0, 200.0, &log))
            .unwrap();
        let c = s
            .add_child(
                p,
                Recorder::new("C", 100.0, 100.0, &log).on_input(|_cx, e| e.stop()),
            )
            .unwrap();
        let g = s.add_child(c, Recorder::new("G", 50.0, 50.0, &log)).unwrap();
        s.repaint();
        let sink = observed.clone();
        s.on_input(move |e| sink.borrow_mut().push((e.type_name(), e.is_stopped())));

        let out = down(&mut s, 10.0, 10.0);
        assert_eq!(out.target, Some(g));
        assert!(out.stopped);
        assert_eq!(
            entries(&log),
            vec!["P:pointer-down@10,10", "C:pointer-down@10,10"]
        );
        // The observer runs after the path, even for a stopped event.
        assert_eq!(*observed.borrow(), vec![("pointer-down", true)]);
    }

    #[test]
    fn observer_sees_surface_coordinates() {
        let log = log();
        let (mut s, _, _, _) = overlapping(&log);
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        s.on_input(move |e| *sink.borrow_mut() = e.position());
        down(&mut s, 75.0, 75.0);
        assert_eq!(*seen.borrow(), Some(Point::new(75.0, 75.0)));
    }

    #[test]
    fn wheel_is_hit_tested_without_capture() {
        let log = log();
        let (mut s, _, a, b) = overlapping(&log);
        assert_eq!(
            s.wheel(Point::new(75.0, 75.0), Point::new(0.0, 3.0), Modifiers::empty())
                .target,
            Some(b)
        );
        assert_eq!(
            s.wheel(Point::new(10.0, 10.0), Point::new(0.0, 3.0), Modifiers::empty())
                .target,
            Some(a)
        );
        assert!(s.pointer_state().is_idle());
    }

    #[test]
    fn focus_is_exclusive_and_release_is_idempotent() {
        let log = log();
        let (mut s, _, a, b) = overlapping(&log);
        s.set_keyboard_focus(a).unwrap();
        assert!(s.is_keyboard_focus(a));
        s.set_keyboard_focus(b).unwrap();
        assert!(!s.is_keyboard_focus(a));
        assert!(s.is_keyboard_focus(b));

        assert!(!s.release_keyboard_focus(a));
        assert!(s.is_keyboard_focus(b));
        assert!(s.release_keyboard_focus(b));
        assert!(!s.release_keyboard_focus(b));
        assert_eq!(s.keyboard_focus(), None);

        assert_eq!(
            entries(&log),
            vec![
                "A:focus-gained",
                "A:focus-lost",
                "B:focus-gained",
                "B:focus-lost",
            ]
        );
    }

    #[test]
    fn keyboard_goes_to_the_holder_or_nowhere() {
        let log = log();
        let (mut s, _, a, _) = overlapping(&log);
        let key = || KeyEvent::down(Key::Character('x'), "KeyX", Modifiers::empty());
        assert_eq!(s.key(key()).delivered, 0);
        assert!(entries(&log).is_empty());

        s.set_keyboard_focus(a).unwrap();
        log.borrow_mut().clear();
        let out = s.key(key());
        assert_eq!(out.target, Some(a));
        assert_eq!(entries(&log), vec!["A:keyboard-down"]);
    }

    #[test]
    fn focus_notices_arrive_after_the_handler_returns() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let order = log.clone();
        s.add_child(
            root,
            Recorder::new("A", 100.0, 100.0, &log).on_input(move |cx, e| {
                if e.is_pointer_down() {
                    let me = cx.id();
                    cx.set_keyboard_focus(me);
                    order.borrow_mut().push("A:handler-done".into());
                }
            }),
        )
        .unwrap();
        s.repaint();
        down(&mut s, 5.0, 5.0);
        assert_eq!(
            entries(&log),
            vec!["A:pointer-down@5,5", "A:handler-done", "A:focus-gained"]
        );
    }

    #[test]
    fn removing_the_focus_holder_clears_focus() {
        let log = log();
        let (mut s, root, a, _) = overlapping(&log);
        s.set_keyboard_focus(a).unwrap();
        assert!(s.remove_child(root, a));
        assert_eq!(s.keyboard_focus(), None);
        assert!(!s.tree().contains(a));
        assert!(!s.remove_child(root, a));
    }

    #[test]
    fn tree_edits_from_handlers_wait_for_dispatch_to_finish() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let p = s.add_child(root, Recorder::new("P", 200.0, 200.0, &log)).unwrap();
        let checks = log.clone();
        let c = s
            .add_child(
                p,
                Recorder::new("C", 50.0, 50.0, &log).on_input(move |cx, e| {
                    if e.is_pointer_down() {
                        let me = cx.id();
                        let parent = cx.parent(me).unwrap();
                        assert!(cx.remove_child(parent, me));
                        // Still attached until the dispatch completes.
                        checks
                            .borrow_mut()
                            .push(format!("attached={}", cx.tree().find_child(parent, me)));
                    }
                }),
            )
            .unwrap();
        s.repaint();
        down(&mut s, 10.0, 10.0);
        assert!(!s.tree().contains(c));
        assert!(s.tree().children(p).is_empty());
        assert!(entries(&log).contains(&"attached=true".to_string()));

        // The captured path now holds a dead id; the walk stops there.
        log.borrow_mut().clear();
        up(&mut s, 10.0, 10.0);
        assert_eq!(entries(&log), vec!["P:pointer-up@10,10"]);
    }

    #[test]
    fn handler_can_add_children() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let inner = log.clone();
        let p = s
            .add_child(
                root,
                Recorder::new("P", 100.0, 100.0, &log).on_input(move |cx, e| {
                    if e.is_pointer_down() {
                        let me = cx.id();
                        cx.add_child(me, Recorder::new("new", 10.0, 10.0, &inner));
                    }
                }),
            )
            .unwrap();
        s.repaint();
        down(&mut s, 50.0, 50.0);
        assert_eq!(s.tree().children(p).len(), 1);
        assert_eq!(s.find_by_name("new"), s.tree().children(p).first().copied());
    }

    #[test]
    fn repaint_requested_by_a_handler_runs_before_dispatch_returns() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        s.add_child(
            root,
            Recorder::new("A", 100.0, 100.0, &log).on_input(|cx, _| cx.request_repaint()),
        )
        .unwrap();
        s.repaint();
        assert_eq!(s.frames(), 1);
        down(&mut s, 5.0, 5.0);
        assert_eq!(s.frames(), 2);
        up(&mut s, 5.0, 5.0);
        assert_eq!(s.frames(), 3);
        down(&mut s, 250.0, 250.0);
        assert_eq!(s.frames(), 3);
    }

    #[test]
    fn repaint_after_input_config() {
        let log = log();
        let mut s = Surface::new(
            SurfaceConfig::new(100.0, 100.0).repaint_after_input(true),
            SceneCanvas::new(),
        );
        s.set_root(Recorder::fill("root", &log));
        down(&mut s, 5.0, 5.0);
        up(&mut s, 5.0, 5.0);
        assert_eq!(s.frames(), 2);
    }

    #[test]
    fn own_view_is_busy_during_its_handler() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let result = Rc::new(RefCell::new(None));
        let sink = result.clone();
        s.add_child(
            root,
            Recorder::new("A", 100.0, 100.0, &log).on_input(move |cx, _| {
                let me = cx.id();
                *sink.borrow_mut() = Some(cx.view_mut::<Recorder>(me).err());
            }),
        )
        .unwrap();
        s.repaint();
        let a = s.find_by_name("A").unwrap();
        down(&mut s, 5.0, 5.0);
        assert_eq!(*result.borrow(), Some(Some(Error::ViewBusy(a))));
    }

    #[test]
    fn typed_access_checks_the_view_type() {
        let log = log();
        let (s, _, a, _) = overlapping(&log);
        assert!(s.view::<Recorder>(a).is_ok());
        assert!(matches!(
            s.view::<Other>(a),
            Err(Error::WrongViewType { id, .. }) if id == a
        ));
    }

    #[test]
    fn find_by_name_prefers_later_children() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let first = s.add_child(root, Recorder::new("x", 1.0, 1.0, &log)).unwrap();
        let second = s.add_child(root, Recorder::new("x", 1.0, 1.0, &log)).unwrap();
        assert_eq!(s.find_by_name("x"), Some(second));
        s.set_name(second, "y").unwrap();
        assert_eq!(s.find_by_name("x"), Some(first));
        assert_eq!(s.find_by_name("missing"), None);
    }

    #[test]
    fn coordinate_conversion_follows_ancestors() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let p = s.add_child(root, Recorder::new("P", 100.0, 100.0, &log)).unwrap();
        let c = s.add_child(p, Recorder::new("C", 10.0, 10.0, &log)).unwrap();
        place(&mut s, p, 20.0, 30.0);
        place(&mut s, c, 5.0, 5.0);
        assert_eq!(s.view_to_surface(Point::ZERO, c), Point::new(25.0, 35.0));
        assert_eq!(
            s.surface_to_view(Point::new(30.0, 40.0), c),
            Point::new(5.0, 5.0)
        );
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let log = log();
        let (mut s, _, a, _) = overlapping(&log);
        let calls = Rc::new(RefCell::new(Vec::new()));
        let c1 = calls.clone();
        let first = s
            .on(a, CommandKind::Action, move |_, ev| {
                c1.borrow_mut().push(("first", ev.payload.clone()))
            })
            .unwrap();
        let c2 = calls.clone();
        s.on(a, CommandKind::Action, move |_, ev| {
            c2.borrow_mut().push(("second", ev.payload.clone()))
        })
        .unwrap();
        let c3 = calls.clone();
        s.on(a, CommandKind::Change, move |_, _| {
            c3.borrow_mut().push(("change", Payload::None))
        })
        .unwrap();

        s.fire(a, CommandKind::Action, Payload::Index(3)).unwrap();
        assert_eq!(
            *calls.borrow(),
            vec![("first", Payload::Index(3)), ("second", Payload::Index(3))]
        );

        assert!(s.off(a, CommandKind::Action, first));
        assert!(!s.off(a, CommandKind::Action, first));
        assert!(!s.off(a, CommandKind::Change, first));
        calls.borrow_mut().clear();
        s.fire(a, CommandKind::Action, Payload::None).unwrap();
        assert_eq!(*calls.borrow(), vec![("second", Payload::None)]);
    }

    #[test]
    fn listener_added_while_firing_waits_for_the_next_fire() {
        let log = log();
        let (mut s, _, a, _) = overlapping(&log);
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        s.on(a, CommandKind::Action, move |cx, ev| {
            let counter = counter.clone();
            cx.on(ev.source, CommandKind::Action, move |_, _| {
                *counter.borrow_mut() += 1
            })
            .unwrap();
        })
        .unwrap();
        s.fire(a, CommandKind::Action, Payload::None).unwrap();
        assert_eq!(*count.borrow(), 0);
        assert_eq!(s.tree().listener_count(a, CommandKind::Action), 2);
        s.fire(a, CommandKind::Action, Payload::None).unwrap();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    #[should_panic(expected = "listener failed")]
    fn listener_panics_propagate() {
        let log = log();
        let (mut s, _, a, _) = overlapping(&log);
        s.on(a, CommandKind::Change, |_, _| panic!("listener failed"))
            .unwrap();
        let _ = s.fire(a, CommandKind::Change, Payload::None);
    }

    #[test]
    fn draw_order_follows_child_order() {
        let log = log();
        let (s, _, _, _) = overlapping(&log);
        let texts: Vec<&str> = s.canvas().scene().texts().collect();
        assert_eq!(texts, vec!["root", "A", "B"]);
        assert_eq!(
            s.canvas().scene().find_text("B").map(|r| r.origin()),
            Some(Point::new(50.0, 50.0))
        );
        assert_eq!(s.canvas().depth(), 0);
    }

    #[test]
    fn hidden_views_and_their_children_are_not_drawn() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let p = s.add_child(root, Recorder::new("P", 50.0, 50.0, &log)).unwrap();
        s.add_child(p, Recorder::new("C", 10.0, 10.0, &log)).unwrap();
        s.set_visible(p, false).unwrap();
        s.repaint();
        let texts: Vec<&str> = s.canvas().scene().texts().collect();
        assert_eq!(texts, vec!["root"]);
    }

    #[test]
    fn clipping_containers_push_a_clip() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let p = s
            .add_child(root, Recorder::new("P", 40.0, 40.0, &log).clipping())
            .unwrap();
        s.add_child(p, Recorder::new("C", 10.0, 10.0, &log)).unwrap();
        place(&mut s, p, 10.0, 10.0);
        s.repaint();
        let nodes = &s.canvas().scene().nodes;
        assert!(nodes.contains(&SceneNode::PushClip {
            rect: Rect::new(10.0, 10.0, 40.0, 40.0)
        }));
        assert!(nodes.contains(&SceneNode::PopClip));
    }

    #[test]
    fn scale_and_resize_apply_on_repaint() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        s.repaint();
        assert_eq!(s.tree().size(root), Size::new(300.0, 300.0));

        s.set_logical_size(Size::new(120.0, 80.0));
        s.set_scale(2.0);
        s.repaint();
        assert_eq!(s.tree().size(root), Size::new(120.0, 80.0));
        assert_eq!(
            s.canvas().scene().find_text("root"),
            Some(Rect::new(0.0, 0.0, 64.0, 32.0))
        );
    }

    #[test]
    fn debug_bounds_stroke_every_visible_view() {
        let log = log();
        let (mut s, _, _, _) = overlapping(&log);
        s.set_debug_bounds(true);
        s.repaint();
        assert_eq!(s.canvas().scene().borders().count(), 3);
    }

    #[test]
    fn clipboard_copy_returns_text_from_the_holder() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let a = s
            .add_child(
                root,
                Recorder::new("A", 10.0, 10.0, &log).on_input(|_cx, e| {
                    if let Some(c) = e.clipboard_mut() {
                        if c.action == ClipboardAction::Copy {
                            c.text = Some("copied".into());
                        }
                    }
                }),
            )
            .unwrap();
        assert_eq!(s.clipboard(ClipboardAction::Copy, None), None);
        s.set_keyboard_focus(a).unwrap();
        assert_eq!(
            s.clipboard(ClipboardAction::Copy, None).as_deref(),
            Some("copied")
        );
    }

    #[test]
    fn replacing_the_root_destroys_the_old_tree() {
        let log = log();
        let (mut s, root, a, _) = overlapping(&log);
        s.set_keyboard_focus(a).unwrap();
        let new_root = s.set_root(Recorder::fill("root2", &log));
        assert_eq!(s.root(), Some(new_root));
        assert!(!s.tree().contains(root));
        assert!(!s.tree().contains(a));
        assert_eq!(s.keyboard_focus(), None);
    }

    #[test]
    fn attach_rejects_cycles() {
        let log = log();
        let mut s = surface();
        let root = s.set_root(Recorder::fill("root", &log));
        let p = s.add_child(root, Recorder::new("P", 1.0, 1.0, &log)).unwrap();
        let c = s.add_child(p, Recorder::new("C", 1.0, 1.0, &log)).unwrap();
        assert_eq!(
            s.attach(c, p),
            Err(Error::Cycle {
                parent: c,
                child: p
            })
        );
    }

    #[test]
    fn move_child_changes_z_order() {
        let log = log();
        let (mut s, root, a, b) = overlapping(&log);
        s.move_child(root, b, 0).unwrap();
        assert_eq!(s.tree().children(root), &[b, a]);
        assert_eq!(down(&mut s, 75.0, 75.0).target, Some(a));
        assert_eq!(
            s.move_child(a, b, 0),
            Err(Error::NotAChild {
                parent: a,
                child: b
            })
        );
    }

    #[test]
    fn layout_without_root_is_an_error() {
        let mut s = surface();
        assert_eq!(s.layout(), Err(Error::NoRoot));
        // Dispatch before a root exists is ignored.
        assert_eq!(down(&mut s, 1.0, 1.0), Dispatched::default());
    }
}
