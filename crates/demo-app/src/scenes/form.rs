use anyhow::Result;
use rune_config::InputType;
use rune_field::{
    Callbacks, FieldId, InputOptions, OverlayMessage, PointerButton, StyleOverrides,
    TextareaOptions,
};
use rune_raster::Point;

use super::{Page, Scene};
use crate::host::DemoHost;

/// A small sign-up form clicked through like a user would.
#[derive(Default)]
pub struct FormScene;

fn logging_callbacks(label: &'static str) -> Callbacks {
    Callbacks::new()
        .on_focus(move |id| log::info!("{label} ({id}) focused"))
        .on_blur(move |id| log::info!("{label} ({id}) blurred"))
        .on_input(move |id, value| log::info!("{label} ({id}) input {value:?}"))
}

fn click(overlay: &mut rune_field::Overlay<DemoHost>, field: FieldId, x: f32) {
    let result = overlay.handle(OverlayMessage::FieldPointerDown {
        field,
        local: Point::new(x, 10.0),
        button: PointerButton::Primary,
    });
    log::debug!("click on {field}: {result:?}");
    overlay.handle(OverlayMessage::PointerDown { on_control: false });
    overlay.handle(OverlayMessage::FieldPointerUp { field });
    overlay.handle(OverlayMessage::PointerUp);
}

impl Scene for FormScene {
    fn name(&self) -> &'static str {
        "form"
    }

    fn run(&mut self, overlay: &mut rune_field::Overlay<DemoHost>, page: &mut Page) -> Result<()> {
        let sized = |width: f32, height: f32| StyleOverrides {
            width: Some(width),
            height: Some(height),
            ..StyleOverrides::default()
        };

        let name = overlay.create_input(InputOptions {
            placeholder: Some("Name".into()),
            style: sized(240.0, 30.0),
            callbacks: logging_callbacks("name"),
            ..InputOptions::default()
        });
        let password = overlay.create_input(InputOptions {
            input_type: Some(InputType::Password),
            placeholder: Some("Password".into()),
            max_length: Some(32),
            style: sized(240.0, 30.0),
            callbacks: logging_callbacks("password"),
            ..InputOptions::default()
        });
        let bio = overlay.create_textarea(TextareaOptions {
            placeholder: Some("About you".into()),
            style: sized(240.0, 90.0),
            callbacks: logging_callbacks("bio"),
            ..TextareaOptions::default()
        });
        overlay.set_position(name, Point::new(40.0, 40.0));
        overlay.set_position(password, Point::new(40.0, 90.0));
        overlay.set_position(bio, Point::new(40.0, 140.0));
        overlay.render(page.rect());
        page.snapshot(overlay, "empty")?;

        click(overlay, name, 6.0);
        overlay.handle(OverlayMessage::InputChanged("Ada Lovelace".into()));
        page.snapshot(overlay, "name-focused")?;

        click(overlay, password, 6.0);
        overlay.handle(OverlayMessage::InputChanged("hunter2".into()));
        click(overlay, bio, 6.0);
        overlay.handle(OverlayMessage::InputChanged(
            "Wrote the first program.\nLikes engines.".into(),
        ));
        // A viewport resize repositions the control without changing focus.
        overlay.handle(OverlayMessage::Resized { canvas: page.rect() });
        overlay.handle(OverlayMessage::PointerDown { on_control: false });
        overlay.render(page.rect());
        page.snapshot(overlay, "filled")?;

        for (label, id) in [("name", name), ("password", password), ("bio", bio)] {
            if let Some(field) = overlay.field(id) {
                log::info!("{id}: value {:?} shown as {:?}", field.value(), field.display_text().text);
                if let Some(texture) = field.texture() {
                    page.save_texture(texture, label)?;
                }
            }
        }

        overlay.update_style(password, |raw| raw.border_color = "#d33".into());
        overlay.set_width(bio, 320.0);
        overlay.render(page.rect());
        page.snapshot(overlay, "restyled")?;

        overlay.destroy(bio);
        overlay.render(page.rect());
        page.snapshot(overlay, "destroyed")?;
        Ok(())
    }
}
