//! `SpatialQuery` backed by the rapier query pipeline.

use bevy::prelude::*;
use bevy_rapier3d::parry::query::ShapeCastOptions;
use bevy_rapier3d::prelude::*;

use super::layers::layer_query_groups;
use crate::core::{RayHit, SpatialQuery, SweepHit, TargetLayer};

/// Upper bound on contacts reported by one sweep.
const MAX_SWEEP_HITS: usize = 10;

pub struct RapierSpatialQuery<'a> {
    context: &'a RapierContext,
}

impl<'a> RapierSpatialQuery<'a> {
    pub fn new(context: &'a RapierContext) -> Self {
        Self { context }
    }
}

fn base_filter<'f>(exclude: Option<Entity>) -> QueryFilter<'f> {
    let filter = QueryFilter::default().exclude_sensors();
    match exclude {
        Some(entity) => filter.exclude_collider(entity),
        None => filter,
    }
}

impl SpatialQuery for RapierSpatialQuery<'_> {
    fn overlap_sphere(
        &self,
        center: Vec3,
        radius: f32,
        layer: TargetLayer,
        exclude: Option<Entity>,
    ) -> Vec<Entity> {
        let shape = Collider::ball(radius);
        let filter = base_filter(exclude).groups(layer_query_groups(layer));
        let mut found = Vec::new();

        self.context
            .intersections_with_shape(center, Quat::IDENTITY, &shape, filter, |entity| {
                found.push(entity);
                true
            });

        found
    }

    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<RayHit> {
        let direction = direction.try_normalize()?;

        self.context
            .cast_ray_and_get_normal(origin, direction, max_distance, true, base_filter(exclude))
            .map(|(entity, hit)| RayHit {
                entity,
                point: hit.point,
                normal: hit.normal,
                distance: hit.time_of_impact,
            })
    }

    fn sweep_sphere(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        distance: f32,
        layer: TargetLayer,
        exclude: Option<Entity>,
    ) -> Vec<SweepHit> {
        let direction = direction.try_normalize().unwrap_or(Vec3::NEG_Z);

        // Colliders already inside the sphere report distance zero
        let mut hits: Vec<SweepHit> = self
            .overlap_sphere(origin, radius, layer, exclude)
            .into_iter()
            .map(|entity| SweepHit {
                entity,
                point: origin,
                normal: -direction,
                distance: 0.0,
            })
            .collect();

        if distance <= 0.0 {
            hits.truncate(MAX_SWEEP_HITS);
            return hits;
        }

        let shape = Collider::ball(radius);

        // Rapier reports only the first contact; exclude it and cast again for the next
        while hits.len() < MAX_SWEEP_HITS {
            let seen: Vec<Entity> = hits.iter().map(|hit| hit.entity).collect();
            let unseen = |entity: Entity| !seen.contains(&entity);
            let filter = base_filter(exclude)
                .groups(layer_query_groups(layer))
                .predicate(&unseen);
            let options = ShapeCastOptions::with_max_time_of_impact(distance);

            let Some((entity, hit)) =
                self.context
                    .cast_shape(origin, Quat::IDENTITY, direction, &shape, options, filter)
            else {
                break;
            };

            // Contact point: the hit collider's surface nearest the sphere at impact
            let center = origin + direction * hit.time_of_impact;
            let only_hit = |candidate: Entity| candidate == entity;
            let point = self
                .context
                .project_point(center, true, QueryFilter::default().predicate(&only_hit))
                .map(|(_, projection)| projection.point)
                .unwrap_or(center + direction * radius);
            let normal = (center - point).try_normalize().unwrap_or(-direction);

            hits.push(SweepHit {
                entity,
                point,
                normal,
                distance: hit.time_of_impact,
            });
        }

        hits
    }
}
