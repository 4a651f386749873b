//! Constant-velocity Kalman filter over a bounding box, using ndarray and a
//! nalgebra-based inverse.

use ndarray::{Array1, Array2};

use crate::tracker::bbox::Rect;

const STATE_DIM: usize = 7;
const OBS_DIM: usize = 4;

/// Per-object motion filter.
///
/// The state is 7-dimensional: `[cx, cy, s, r, vcx, vcy, vs]` where `s` is
/// the box area and `r` the aspect ratio. The aspect ratio carries no
/// velocity term. Only the first four components are observed; the
/// velocities are inferred through correction.
#[derive(Debug, Clone)]
pub struct KalmanBoxFilter {
    mean: Array1<f64>,
    covariance: Array2<f64>,
    motion_mat: Array2<f64>,
    update_mat: Array2<f64>,
    process_cov: Array2<f64>,
    measurement_cov: Array2<f64>,
}

impl KalmanBoxFilter {
    /// Seed the filter from an observed box, with zero initial velocity.
    pub fn new(bbox: Rect) -> Self {
        let mut motion_mat = Array2::eye(STATE_DIM);
        for i in 0..STATE_DIM - OBS_DIM {
            motion_mat[[i, OBS_DIM + i]] = 1.0;
        }

        let mut update_mat = Array2::zeros((OBS_DIM, STATE_DIM));
        for i in 0..OBS_DIM {
            update_mat[[i, i]] = 1.0;
        }

        let process_var = [1.0, 1.0, 1.0, 1.0, 1e-2, 1e-2, 1e-4];
        let mut process_cov = Array2::zeros((STATE_DIM, STATE_DIM));
        for i in 0..STATE_DIM {
            process_cov[[i, i]] = process_var[i];
        }

        let measurement_var = [1.0, 1.0, 10.0, 10.0];
        let mut measurement_cov = Array2::zeros((OBS_DIM, OBS_DIM));
        for i in 0..OBS_DIM {
            measurement_cov[[i, i]] = measurement_var[i];
        }

        let xysr = bbox.to_xysr();
        let mut mean = Array1::zeros(STATE_DIM);
        for i in 0..OBS_DIM {
            mean[i] = xysr[i] as f64;
        }

        // High initial uncertainty on the unobservable velocities.
        let initial_var = [10.0, 10.0, 10.0, 10.0, 1e4, 1e4, 1e4];
        let mut covariance = Array2::zeros((STATE_DIM, STATE_DIM));
        for i in 0..STATE_DIM {
            covariance[[i, i]] = initial_var[i];
        }

        Self {
            mean,
            covariance,
            motion_mat,
            update_mat,
            process_cov,
            measurement_cov,
        }
    }

    /// Advance the state one time step and return the predicted box.
    ///
    /// If the scale velocity would push the area non-positive it is zeroed
    /// before the transition. An area that is already non-positive (reached
    /// through a correction) stays non-positive, and the returned box then
    /// carries non-finite coordinates.
    pub fn predict(&mut self) -> Rect {
        if self.mean[6] + self.mean[2] <= 0.0 {
            self.mean[6] = 0.0;
        }

        self.mean = self.motion_mat.dot(&self.mean);
        self.covariance =
            self.motion_mat.dot(&self.covariance).dot(&self.motion_mat.t()) + &self.process_cov;

        self.state()
    }

    /// Fuse an observed box into the state via the linear filter update.
    pub fn correct(&mut self, bbox: Rect) {
        let xysr = bbox.to_xysr();
        let mut measurement = Array1::zeros(OBS_DIM);
        for i in 0..OBS_DIM {
            measurement[i] = xysr[i] as f64;
        }

        let projected_mean = self.update_mat.dot(&self.mean);
        let projected_cov =
            self.update_mat.dot(&self.covariance).dot(&self.update_mat.t())
                + &self.measurement_cov;

        let innovation = measurement - projected_mean;

        // K = P * H^T * S^-1
        // Since H is [I 0], P * H^T is the first 4 columns of P (7x4).
        // S is projected_cov (4x4); nalgebra inverts it without BLAS/LAPACK.
        let s_inv = invert_4x4(&projected_cov);

        let pht = self.covariance.dot(&self.update_mat.t()); // 7x4
        let kalman_gain = pht.dot(&s_inv); // 7x4

        self.mean = &self.mean + &kalman_gain.dot(&innovation);
        self.covariance =
            &self.covariance - &kalman_gain.dot(&projected_cov).dot(&kalman_gain.t());
    }

    /// Current best-estimate box, without mutating the state.
    pub fn state(&self) -> Rect {
        Rect::from_xysr(
            self.mean[0] as f32,
            self.mean[1] as f32,
            self.mean[2] as f32,
            self.mean[3] as f32,
        )
    }
}

/// Invert a 4x4 matrix using nalgebra (pure Rust).
fn invert_4x4(m: &Array2<f64>) -> Array2<f64> {
    let mut nm = nalgebra::Matrix4::zeros();
    for i in 0..4 {
        for j in 0..4 {
            nm[(i, j)] = m[[i, j]];
        }
    }
    let inv = nm
        .try_inverse()
        .expect("innovation covariance inversion failed");
    let mut res = Array2::zeros((4, 4));
    for i in 0..4 {
        for j in 0..4 {
            res[[i, j]] = inv[(i, j)];
        }
    }
    res
}
