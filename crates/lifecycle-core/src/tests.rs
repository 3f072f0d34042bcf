#[cfg(test)]
mod tests {
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::callback::*;
    use crate::cleanup::*;
    use crate::composer::*;
    use crate::error::LifecycleError;
    use crate::host::ComponentHost;
    use crate::lifecycle::*;
    use crate::scope::*;
    use crate::view::*;

    type Log = Rc<RefCell<Vec<String>>>;

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn recorder(log: &Log, tag: &'static str) -> Callback<u32> {
        let log = log.clone();
        callback(move |x: &u32| log.borrow_mut().push(format!("{tag}({x})")))
    }

    fn recorder_with_teardown(log: &Log, tag: &'static str) -> Callback<u32> {
        let log = log.clone();
        callback_with_cleanup(move |x: &u32| {
            log.borrow_mut().push(format!("{tag}({x})"));
            let log = log.clone();
            on_cleanup(move |x: &u32| log.borrow_mut().push(format!("~{tag}({x})")))
        })
    }

    fn entries(log: &Log) -> Vec<String> {
        log.borrow().clone()
    }

    #[test]
    fn test_non_slot_names_read_as_absent() {
        let calls = log();
        let mut c = Composer::<u32>::new();

        assert!(matches!(
            c.set("mount", recorder(&calls, "m")),
            Err(LifecycleError::InvalidSlotName { .. })
        ));
        c.init("internal", Some(recorder(&calls, "i")));
        c.rebuild_evaluator("internal").unwrap();

        assert!(c.get("mount").is_none());
        assert!(c.get("internal").is_none());
        assert!(c.slot("internal").is_none());
        assert!(!c.has("internal"));
        assert!(c.keys().is_empty());
    }

    #[test]
    fn test_assign_then_invoke_calls_once() {
        let calls = log();
        let mut c = Composer::new();
        c.set("onMount", recorder(&calls, "f")).unwrap();

        let evaluator = c.get("onMount").unwrap();
        evaluator(&3);
        assert_eq!(entries(&calls), vec!["f(3)"]);
    }

    #[test]
    fn test_local_runs_before_inherited_newest_first() {
        let calls = log();
        let mut c = Composer::new();
        c.init("onMount", Some(recorder(&calls, "local")));
        c.inherit(&CallbackMap::from([("onMount".to_string(), recorder(&calls, "p"))]));

        c.invoke("onMount", &1);
        assert_eq!(entries(&calls), vec!["local(1)", "p(1)"]);
    }

    #[test]
    fn test_cleanup_is_lifo() {
        let calls = log();
        let mut c = Composer::new();
        c.set("onMount", recorder_with_teardown(&calls, "g")).unwrap();
        c.inherit(&CallbackMap::from([(
            "onMount".to_string(),
            recorder_with_teardown(&calls, "h"),
        )]));

        let cleanup = c.invoke("onMount", &5);
        assert_eq!(cleanup.pending(), 2);
        cleanup.run();
        assert_eq!(entries(&calls), vec!["g(5)", "h(5)", "~h(5)", "~g(5)"]);

        // second run is a no-op
        cleanup.run();
        assert_eq!(calls.borrow().len(), 4);
    }

    #[test]
    fn test_empty_slot_is_noop() {
        let mut c = Composer::<u32>::new();
        c.inherit(&CallbackMap::<u32>::new());

        let cleanup = c.invoke("onMount", &1);
        assert_eq!(cleanup.pending(), 0);
        cleanup.run();

        c.init("onRender", None);
        c.rebuild_evaluator("onRender").unwrap();
        let cleanup = c.get("onRender").unwrap()(&1);
        assert_eq!(cleanup.pending(), 0);
    }

    #[test]
    fn test_inherit_replaces_previous_mapping() {
        let calls = log();
        let mut c = Composer::new();
        c.inherit(&CallbackMap::from([("onMount".to_string(), recorder(&calls, "f1"))]));
        c.inherit(&CallbackMap::from([("onMount".to_string(), recorder(&calls, "f2"))]));

        c.invoke("onMount", &0);
        assert_eq!(entries(&calls), vec!["f2(0)"]);
    }

    #[test]
    fn test_ancestor_removal_reverts_to_local() {
        let calls = log();
        let mut c = Composer::new();
        c.inherit(&CallbackMap::from([("onMount".to_string(), recorder(&calls, "f"))]));
        c.set("onMount", recorder(&calls, "local")).unwrap();
        c.inherit(&CallbackMap::<u32>::new());

        assert!(c.slot("onMount").unwrap().inherited().is_empty());
        c.invoke("onMount", &2);
        assert_eq!(entries(&calls), vec!["local(2)"]);
    }

    #[test]
    fn test_child_inherits_parent_composer() {
        let calls = log();
        let mut parent = Composer::new();
        parent.set("onMount", recorder(&calls, "pf")).unwrap();

        let mut child = Composer::new();
        child.inherit(&parent);
        child.set("onMount", recorder(&calls, "cf")).unwrap();

        child.invoke("onMount", &9);
        assert_eq!(entries(&calls), vec!["cf(9)", "pf(9)"]);
    }

    #[test]
    fn test_inheritance_chains_through_composers() {
        let calls = log();
        let mut grand = Composer::new();
        grand.set("onRender", recorder(&calls, "g")).unwrap();

        let mut parent = Composer::new();
        parent.inherit(&grand);
        parent.set("onRender", recorder(&calls, "p")).unwrap();

        let mut child = Composer::new();
        child.inherit(&parent);
        child.set("onRender", recorder(&calls, "c")).unwrap();

        let inherited = child.slot("onRender").unwrap().inherited().len();
        assert_eq!(inherited, 2);

        child.invoke("onRender", &1);
        assert_eq!(entries(&calls), vec!["c(1)", "p(1)", "g(1)"]);
    }

    #[test]
    fn test_plain_mapping_does_not_chain() {
        let calls = log();
        let mut parent = Composer::new();
        parent.inherit(&CallbackMap::from([("onMount".to_string(), recorder(&calls, "a"))]));
        parent.set("onMount", recorder(&calls, "p")).unwrap();

        let local = parent.slot("onMount").unwrap().local().unwrap().clone();
        let mut leaf = Composer::new();
        leaf.inherit(&CallbackMap::from([("onMount".to_string(), local)]));

        leaf.invoke("onMount", &0);
        assert_eq!(entries(&calls), vec!["p(0)"]);
    }

    #[test]
    fn test_unchanged_ancestor_keeps_evaluator() {
        let calls = log();
        let mut parent = Composer::new();
        parent.set("onMount", recorder(&calls, "p")).unwrap();

        let mut child = Composer::new();
        child.inherit(&parent);
        let before = child.get("onMount").unwrap();
        child.inherit(&parent);
        let after = child.get("onMount").unwrap();
        assert!(Rc::ptr_eq(&before, &after));

        parent.set("onMount", recorder(&calls, "p2")).unwrap();
        child.inherit(&parent);
        let changed = child.get("onMount").unwrap();
        assert!(!Rc::ptr_eq(&before, &changed));

        changed(&4);
        assert_eq!(entries(&calls), vec!["p2(4)"]);
    }

    #[test]
    fn test_set_replaces_local_and_rebuilds() {
        let calls = log();
        let mut c = Composer::new();
        c.set("onUnmount", recorder(&calls, "a")).unwrap();
        c.set("onUnmount", recorder(&calls, "b")).unwrap();

        c.invoke("onUnmount", &8);
        assert_eq!(entries(&calls), vec!["b(8)"]);
    }

    #[test]
    fn test_set_value_rejects_non_callbacks() {
        let calls = log();
        let mut c = Composer::new();
        c.set("onMount", recorder(&calls, "kept")).unwrap();

        let err = c.set_value("onMount", Box::new(42u32)).unwrap_err();
        assert_eq!(
            err,
            LifecycleError::NotCallable {
                name: "onMount".to_string()
            }
        );

        c.invoke("onMount", &1);
        assert_eq!(entries(&calls), vec!["kept(1)"]);

        let replacement: Box<dyn Any> = Box::new(recorder(&calls, "new"));
        c.set_value("onMount", replacement).unwrap();
        c.invoke("onMount", &2);
        assert_eq!(entries(&calls), vec!["kept(1)", "new(2)"]);
    }

    #[test]
    fn test_rebuild_unknown_slot() {
        let mut c = Composer::<u32>::new();
        assert_eq!(
            c.rebuild_evaluator("onMissing"),
            Err(LifecycleError::UnknownSlot {
                name: "onMissing".to_string()
            })
        );
    }

    #[test]
    fn test_keys_and_has_filter_prefix() {
        let calls = log();
        let mut c = Composer::new();
        c.set("onRender", recorder(&calls, "r")).unwrap();
        c.set("onMount", recorder(&calls, "m")).unwrap();
        c.init("bookkeeping", None);

        assert_eq!(c.keys(), vec!["onMount".to_string(), "onRender".to_string()]);
        assert!(c.has("onMount"));
        assert!(!c.has("bookkeeping"));
        assert!(!c.has("onUnmount"));

        assert!(c.remove("onMount"));
        assert_eq!(c.keys(), vec!["onRender".to_string()]);
    }

    #[test]
    fn test_declared_lifecycle_skips_empty_fields() {
        let calls = log();
        let declared = Lifecycle::new().with_on_mount(recorder(&calls, "app"));
        let view = use_lifecycle(Some(&declared));

        assert_eq!(view.keys(), vec!["onMount".to_string()]);
        assert!(view.on_render().is_none());

        view.set_on_render(recorder(&calls, "cool"));
        view.run(Phase::Render, &1);
        view.run(Phase::Mount, &1);
        assert_eq!(entries(&calls), vec!["cool(1)", "app(1)"]);
    }

    #[test]
    fn test_view_sync_with_view() {
        let calls = log();
        let parent = LifecycleView::new();
        parent.set_on_mount(recorder(&calls, "p"));

        let child = LifecycleView::new();
        child.sync_with_view(&parent);
        child.set_on_mount(recorder(&calls, "c"));
        child.sync_with_view(&child);

        child.run(Phase::Mount, &3);
        assert_eq!(entries(&calls), vec!["c(3)", "p(3)"]);
    }

    #[test]
    fn test_callback_may_write_into_view() {
        let calls = log();
        let view = LifecycleView::new();
        let late = recorder(&calls, "late");
        let handle = view.clone();
        view.set_on_mount(callback(move |_: &u32| {
            handle.set_on_render(late.clone());
        }));

        view.run(Phase::Mount, &0);
        view.run(Phase::Render, &0);
        assert_eq!(entries(&calls), vec!["late(0)"]);
    }

    #[test]
    fn test_scope_children_dispose_first() {
        let calls = log();
        let scope = Scope::new();
        let child = scope.child();

        let c = calls.clone();
        scope.add_disposer(move || c.borrow_mut().push("parent".to_string()));
        let c = calls.clone();
        child.add_disposer(move || c.borrow_mut().push("child".to_string()));

        scope.clone().dispose();
        assert_eq!(entries(&calls), vec!["child", "parent"]);

        scope.dispose();
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn test_on_dispose_uses_current_scope() {
        let calls = log();
        let scope = Scope::new();
        let c = calls.clone();
        scope.run(|| on_dispose(move || c.borrow_mut().push("done".to_string())));

        assert_eq!(scope.disposer_count(), 1);
        assert!(calls.borrow().is_empty());
        scope.dispose();
        assert_eq!(entries(&calls), vec!["done"]);
    }

    #[test]
    fn test_host_phases() {
        let calls = log();
        let view = LifecycleView::new();
        view.set_on_mount(recorder_with_teardown(&calls, "mount"));
        view.set_on_render(recorder_with_teardown(&calls, "render"));
        view.set_on_unmount(recorder(&calls, "unmount"));

        let host = ComponentHost::new(7u32, view);
        assert_eq!(host.render(), Err(LifecycleError::NotMounted));

        host.mount().unwrap();
        assert_eq!(host.mount(), Err(LifecycleError::AlreadyMounted));
        host.render().unwrap();
        host.render().unwrap();
        host.unmount().unwrap();
        assert!(!host.is_mounted());
        assert_eq!(host.unmount(), Err(LifecycleError::NotMounted));

        assert_eq!(
            entries(&calls),
            vec![
                "mount(7)",
                "render(7)",
                "~render(7)",
                "render(7)",
                "~render(7)",
                "~mount(7)",
                "unmount(7)",
            ]
        );
    }

    #[test]
    fn test_host_reads_unmount_at_teardown() {
        let calls = log();
        let view = LifecycleView::new();
        view.set_on_unmount(recorder(&calls, "old"));

        let host = ComponentHost::new(1u32, view.clone());
        host.mount().unwrap();
        view.set_on_unmount(recorder(&calls, "new"));
        host.unmount().unwrap();

        assert_eq!(entries(&calls), vec!["new(1)"]);
    }

    #[test]
    fn test_host_unmounts_children_first() {
        let calls = log();
        let parent_view = LifecycleView::new();
        parent_view.set_on_unmount(recorder(&calls, "parent"));
        let child_view = LifecycleView::new();
        child_view.set_on_unmount(recorder(&calls, "child"));

        let parent = ComponentHost::new(1u32, parent_view);
        let child = parent.child(2, child_view);
        parent.mount().unwrap();
        child.mount().unwrap();

        parent.unmount().unwrap();
        assert!(!child.is_mounted());
        assert_eq!(entries(&calls), vec!["child(2)", "parent(1)"]);

        drop(child);
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn test_drop_tears_down_mounted_host() {
        let calls = log();
        let view = LifecycleView::new();
        view.set_on_unmount(recorder(&calls, "bye"));
        {
            let host = ComponentHost::new(3u32, view);
            host.mount().unwrap();
        }
        assert_eq!(entries(&calls), vec!["bye(3)"]);
    }

    #[test]
    fn test_phase_slot_names() {
        let names: Vec<_> = Phase::ALL.iter().map(|p| p.slot_name()).collect();
        assert_eq!(names, vec!["onMount", "onRender", "onUnmount"]);
        assert!(Phase::ALL.iter().all(|p| is_slot_name(p.slot_name())));
    }
}
