use tracing::warn;

use crate::context::{BridgeError, WindowContext};
use crate::host::{ComponentHost, MISSING_HOST_MESSAGE};
use crate::messages::{EngineToHost, HostToEngine};
use crate::provider::DimensionProvider;

/// Outside collaborators a message may need. Both are optional: without a
/// provider panel sizes come from the local calculator, and without a
/// component host the BOM cannot be exported.
#[derive(Default)]
pub struct HostServices<'a> {
    pub provider: Option<&'a dyn DimensionProvider>,
    pub host: Option<&'a mut dyn ComponentHost>,
}

/// Dispatch a host message to a window context and return the response.
///
/// Every failure is converted into an [`EngineToHost::Error`]; a missing
/// component host becomes a blocking notification instead.
pub fn dispatch(
    ctx: &mut WindowContext,
    msg: HostToEngine,
    services: &mut HostServices<'_>,
) -> EngineToHost {
    match handle_message(ctx, msg, services) {
        Ok(response) => response,
        Err(e) => {
            warn!(window = %ctx.id, error = %e, "host message failed");
            EngineToHost::Error {
                message: e.to_string(),
            }
        }
    }
}

fn handle_message(
    ctx: &mut WindowContext,
    msg: HostToEngine,
    services: &mut HostServices<'_>,
) -> Result<EngineToHost, BridgeError> {
    match msg {
        HostToEngine::Recompute { params } => {
            ctx.recompute(params, services.provider);
            layout_updated(ctx)
        }

        HostToEngine::SetCanvas { width, height } => {
            ctx.set_canvas(width, height, services.provider);
            layout_updated(ctx)
        }

        HostToEngine::SetInfillType { panel_id, infill } => {
            ctx.set_infill_type(&panel_id, infill, services.provider);
            Ok(panels_updated(ctx))
        }

        HostToEngine::GetPanels => Ok(panels_updated(ctx)),

        HostToEngine::SaveSettings { name } => Ok(EngineToHost::SettingsReady {
            json_data: ctx.save_settings(name)?,
        }),

        HostToEngine::LoadSettings { data } => {
            ctx.load_settings(&data, services.provider)?;
            layout_updated(ctx)
        }

        HostToEngine::ExportBom => match services.host.as_mut() {
            Some(host) => export_bom(ctx, &mut **host),
            None => {
                warn!(window = %ctx.id, "BOM export requested without a component host");
                Ok(EngineToHost::Notification {
                    message: MISSING_HOST_MESSAGE.to_string(),
                    blocking: true,
                })
            }
        },
    }
}

fn export_bom(
    ctx: &WindowContext,
    host: &mut dyn ComponentHost,
) -> Result<EngineToHost, BridgeError> {
    let document = ctx.bom()?;
    host.generate_parts(&document)?;
    Ok(EngineToHost::BomReady { document })
}

fn layout_updated(ctx: &WindowContext) -> Result<EngineToHost, BridgeError> {
    let layout = ctx.layout.as_ref().ok_or(BridgeError::NotComputed)?;
    Ok(EngineToHost::LayoutUpdated {
        scale: layout.scale,
        offset_x: layout.offset_x,
        offset_y: layout.offset_y,
        drawables: layout.drawables.clone(),
        panels: layout.panels.clone(),
    })
}

fn panels_updated(ctx: &WindowContext) -> EngineToHost {
    EngineToHost::PanelsUpdated {
        panels: ctx.panel_records(),
    }
}
