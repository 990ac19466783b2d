/*
 * Responsibility
 * - Public surface of the middleware layer
 * - cors / http are transport concerns; auth gates the resource routes
 */
pub mod auth;
pub mod bearer_auth;
pub mod cors;
pub mod http;
