use anyhow::{anyhow, Context, Result};
use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::info;
use raw_window_handle::HasRawWindowHandle;
use std::{
    num::NonZeroU32,
    time::{Duration, Instant},
};
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

use crate::config::AppConfig;
use crate::render::{BufferError, GlApi, ShaderError};
use crate::utils::logging;

/// Why a tutorial could not build its GL resources.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error(transparent)]
    Shader(#[from] ShaderError),
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// One tutorial program. The implementor owns everything it created during
/// `init` and is the only state the render loop touches.
pub trait Tutorial: Sized {
    const TITLE: &'static str;
    const DEFAULT_SIZE: (u32, u32) = (640, 480);

    /// Builds the shader program, buffers and input locations. Any error
    /// aborts startup before the first frame.
    fn init(gl: GlApi, config: &AppConfig) -> Result<Self, InitError>;

    /// Advances animation state; `elapsed` is the time since startup.
    fn update(&mut self, _elapsed: Duration) {}

    fn render(&self);

    fn resize(&mut self, width: u32, height: u32) {
        unsafe { gl::Viewport(0, 0, width as i32, height as i32) };
    }
}

struct App<T: Tutorial> {
    // Declared first so GL objects are released while the context is current.
    tutorial: T,
    window: Window,
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    start: Instant,
}

impl<T: Tutorial> App<T> {
    fn new(config: &AppConfig) -> Result<(Self, EventLoop<()>)> {
        let event_loop = EventLoopBuilder::new().build()?;
        let (width, height) = config.window.size_or(T::DEFAULT_SIZE);
        let window_builder = WindowBuilder::new()
            .with_title(T::TITLE)
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(config.window.resizable);

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(config.window.alpha_bits)
            .with_depth_size(config.window.depth_bits);

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(&event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("display offered no framebuffer configurations")
            })
            .map_err(|e| anyhow!("Error: can't create window: {}", e))?;
        let window = window.context("Error: display builder returned no window")?;

        let [major, minor] = config.window.gl_version;
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Compatibility)
            .build(Some(window.raw_window_handle()));

        let gl_display = gl_config.display();
        let not_current = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .context("Error: can't create OpenGL context")?
        };

        let attrs = window.build_surface_attributes(<_>::default());
        let gl_surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .context("Error: can't create GL surface")?
        };
        let gl_context = not_current
            .make_current(&gl_surface)
            .context("Error: can't make OpenGL context current")?;

        if config.window.vsync {
            if let Err(e) =
                gl_surface.set_swap_interval(&gl_context, SwapInterval::Wait(NonZeroU32::MIN))
            {
                log::warn!("Could not enable vsync: {}", e);
            }
        }

        let gl = GlApi::load_with(|symbol| gl_display.get_proc_address(symbol))?;
        info!("OpenGL {}.{} context ready", major, minor);

        let tutorial = T::init(gl, config)
            .with_context(|| format!("Error: {} failed to initialise", T::TITLE))?;
        info!("{} initialised", T::TITLE);

        Ok((
            Self {
                tutorial,
                window,
                gl_context,
                gl_surface,
                start: Instant::now(),
            },
            event_loop,
        ))
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // Minimised; keep the old surface until there is something to draw to.
            return;
        };
        self.gl_surface.resize(&self.gl_context, width, height);
        self.tutorial.resize(width.get(), height.get());
    }

    fn redraw(&mut self) -> Result<()> {
        self.tutorial.update(self.start.elapsed());
        self.tutorial.render();
        self.gl_surface
            .swap_buffers(&self.gl_context)
            .context("Error: swap buffers failed")
    }
}

/// Opens the window, initialises `T` and renders until the window is closed.
/// Startup failures come back as errors so the process exits non-zero.
pub fn run<T: Tutorial>() -> Result<()> {
    let config = AppConfig::from_env()?;
    logging::init(&config.log_level)?;
    info!("Starting {}", T::TITLE);

    let (mut app, event_loop) = App::<T>::new(&config)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut failure = None;
    event_loop.run(|event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => app.resize(size),
            WindowEvent::RedrawRequested => {
                if let Err(e) = app.redraw() {
                    failure = Some(e);
                    elwt.exit();
                }
            }
            _ => (),
        },
        Event::AboutToWait => app.window.request_redraw(),
        _ => (),
    })?;

    match failure {
        Some(e) => Err(e),
        None => {
            info!("{} closed", T::TITLE);
            Ok(())
        }
    }
}
