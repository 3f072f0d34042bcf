use lifecycle_core::prelude::*;

#[derive(Clone, Debug)]
struct Element {
    class_name: String,
}

/// The root declares plain callbacks for its child.
fn app() -> Lifecycle<Element> {
    Lifecycle::new()
        .with_on_mount(callback(|el: &Element| {
            log::info!("[App]: onMount(): {el:?}")
        }))
        .with_on_unmount(callback(|el: &Element| {
            log::info!("[App]: onUnmount(): {el:?}")
        }))
        .with_on_render(callback(|el: &Element| {
            log::info!("[App]: onRender(): {el:?}")
        }))
}

/// Adds its own callbacks on top of whatever the parent declared.
fn cool_component(lifecycle: &Lifecycle<Element>) -> LifecycleView<Element> {
    let view = use_lifecycle(Some(lifecycle));

    view.set_on_mount(callback_with_cleanup(|el: &Element| {
        log::info!("[CoolComponent]: onMount() {el:?}");
        on_cleanup(|el: &Element| log::info!("[CoolComponent]: mount cleanup {el:?}"))
    }));
    view.set_on_unmount(callback(|el: &Element| {
        log::info!("[CoolComponent]: onUnmount() {el:?}")
    }));
    view.set_on_render(callback(|el: &Element| {
        log::info!("[CoolComponent]: onRender() {el:?}")
    }));

    view
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let declared = app();
    let lifecycle = cool_component(&declared);

    let base = ComponentHost::new(
        Element {
            class_name: "BaseComponent CoolComponent".into(),
        },
        lifecycle.clone(),
    );

    log::info!("<div class=\"{}\">", base.element().class_name);
    base.mount()?;
    base.render()?;

    // parent re-renders with the same declaration; nothing is rebuilt
    lifecycle.sync(&declared);
    base.render()?;

    base.unmount()?;
    Ok(())
}
