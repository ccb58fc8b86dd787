use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::SimulationConfig;
use crate::core::vector::DIM;
use crate::core::{Container, ContainerId, Particle, Simulation, Vec2, World};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Python-facing wrapper around the Rust Simulation core, for external renderers.
///
/// API:
/// - __new__(center, half_lengths, config_json=None)
/// - add_container(parent, center, half_lengths) -> int
/// - add_particle(container, position, velocity, radius=0.01, mass=1.0) -> int
/// - step(dt), advance_to(time, max_dt)
/// - get_positions() / get_velocities() -> np.ndarray, shape (N, 2)
/// - get_radii() / get_energies() -> np.ndarray, shape (N,)
#[pyclass(name = "Simulation")]
pub struct PySimulation {
    sim: Simulation,
}

fn vec2(v: (f64, f64)) -> Vec2 {
    Vec2::new(v.0, v.1)
}

#[pymethods]
impl PySimulation {
    /// Create a simulation whose root box is centered at `center` with `half_lengths`.
    ///
    /// `config_json` is an optional JSON document with keys physics_type,
    /// collision_detection, collision_handler and gravity_scale.
    ///
    /// Errors: raises ValueError on invalid parameters or configuration.
    #[new]
    #[pyo3(signature = (center, half_lengths, config_json=None))]
    fn new(
        center: (f64, f64),
        half_lengths: (f64, f64),
        config_json: Option<&str>,
    ) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => SimulationConfig::from_json_str(json).map_err(py_err)?,
            None => SimulationConfig::default(),
        };
        let root = Container::new(vec2(center), vec2(half_lengths)).map_err(py_err)?;
        let sim = Simulation::new(World::new(root), config).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Attach a nested box below container `parent` (0 is the root). Returns its id.
    fn add_container(
        &mut self,
        parent: usize,
        center: (f64, f64),
        half_lengths: (f64, f64),
    ) -> PyResult<usize> {
        let container = Container::new(vec2(center), vec2(half_lengths)).map_err(py_err)?;
        let id = self
            .sim
            .world_mut()
            .add_container(ContainerId(parent), container)
            .map_err(py_err)?;
        Ok(id.index())
    }

    /// Add a particle to container `container`. Returns its index within that container.
    #[pyo3(signature = (container, position, velocity, radius=0.01, mass=1.0))]
    fn add_particle(
        &mut self,
        container: usize,
        position: (f64, f64),
        velocity: (f64, f64),
        radius: f64,
        mass: f64,
    ) -> PyResult<usize> {
        let particle = Particle::new(vec2(position), vec2(velocity), radius, mass).map_err(py_err)?;
        self.sim
            .world_mut()
            .add_particle(ContainerId(container), particle)
            .map_err(py_err)
    }

    /// Advance by one step of `dt` (releases the GIL during computation).
    fn step(&mut self, py: Python<'_>, dt: f64) -> PyResult<()> {
        py.detach(|| self.sim.step(dt)).map(|_| ()).map_err(py_err)
    }

    /// Advance to the absolute `target_time` in steps of at most `max_dt`.
    fn advance_to(&mut self, py: Python<'_>, target_time: f64, max_dt: f64) -> PyResult<()> {
        py.detach(|| self.sim.advance_to(target_time, max_dt))
            .map(|_| ())
            .map_err(py_err)
    }

    /// Current simulation time.
    fn time(&self) -> f64 {
        self.sim.time()
    }

    /// Sum of the cached particle energies.
    fn total_energy(&self) -> f64 {
        self.sim.total_energy()
    }

    /// Positions as a NumPy array of shape (N, 2), depth-first container order.
    fn get_positions<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        let arr = self.table(|p| [p.x(), p.y()]);
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Velocities as a NumPy array of shape (N, 2), depth-first container order.
    fn get_velocities<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray2<f64>>> {
        let arr = self.table(|p| [p.vx(), p.vy()]);
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Radii as a NumPy array of shape (N,).
    fn get_radii<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray1<f64>>> {
        let arr: Array1<f64> = self.sim.world().particles().map(Particle::radius).collect();
        Ok(arr.into_pyarray(py).to_owned().into())
    }

    /// Cached energies as a NumPy array of shape (N,).
    fn get_energies<'py>(&self, py: Python<'py>) -> PyResult<Py<PyArray1<f64>>> {
        let arr: Array1<f64> = self.sim.world().particles().map(Particle::energy).collect();
        Ok(arr.into_pyarray(py).to_owned().into())
    }
}

impl PySimulation {
    fn table(&self, row: impl Fn(&Particle) -> [f64; DIM]) -> Array2<f64> {
        let world = self.sim.world();
        let mut arr = Array2::<f64>::zeros((world.num_particles(), DIM));
        for (i, p) in world.particles().enumerate() {
            for (k, v) in row(p).into_iter().enumerate() {
                arr[[i, k]] = v;
            }
        }
        arr
    }
}

/// The boxsim Python module entry point.
#[pymodule]
fn boxsim(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySimulation>()?;
    Ok(())
}
